//! Dispersion section.

use super::{fmt_opt2, write_heading};
use cs_math::StatisticsSummary;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionSection {
    pub max: f64,
    pub min: f64,
    pub range: f64,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
}

impl DispersionSection {
    pub fn from_summary(summary: &StatisticsSummary) -> Self {
        Self {
            max: summary.max,
            min: summary.min,
            range: summary.range,
            variance: summary.variance,
            std_dev: summary.std_dev,
        }
    }

    pub fn write_text(&self, out: &mut String) {
        write_heading(out, "MEDIDAS DE DISPERSÃO", 20);
        let _ = writeln!(out, "Máximo: {}", self.max);
        let _ = writeln!(out, "Mínimo: {}", self.min);
        let _ = writeln!(out, "Amplitude total: {}", self.range);
        let _ = writeln!(out, "Variância: {}", fmt_opt2(self.variance));
        let _ = writeln!(out, "Desvio padrão: {}", fmt_opt2(self.std_dev));
    }
}
