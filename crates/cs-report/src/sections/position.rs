//! Position section: quartiles and IQR fences.

use super::write_heading;
use cs_math::{QuantileMethod, StatisticsSummary};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Quartiles, fences and extremes in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSection {
    pub min: f64,
    pub lower_fence: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub iqr: f64,
    pub upper_fence: f64,
    pub max: f64,
    pub quantile_method: QuantileMethod,
}

impl PositionSection {
    pub fn from_summary(summary: &StatisticsSummary) -> Self {
        Self {
            min: summary.min,
            lower_fence: summary.lower_fence(),
            q1: summary.q1,
            q2: summary.q2,
            q3: summary.q3,
            iqr: summary.iqr,
            upper_fence: summary.upper_fence(),
            max: summary.max,
            quantile_method: summary.quantile_method,
        }
    }

    pub fn write_text(&self, out: &mut String) {
        write_heading(out, "MEDIDAS DE POSIÇÃO", 20);
        let _ = writeln!(out, "Mínimo: {}", self.min);
        let _ = writeln!(out, "Limite inferior: {}", self.lower_fence);
        let _ = writeln!(out, "Q1: {}", self.q1);
        let _ = writeln!(out, "Q2: {}", self.q2);
        let _ = writeln!(out, "Q3: {}", self.q3);
        let _ = writeln!(out, "IQR: {}", self.iqr);
        let _ = writeln!(out, "Limite superior: {}", self.upper_fence);
        let _ = writeln!(out, "Máximo: {}", self.max);
    }
}
