//! Central tendency section.

use super::{fmt_opt2, write_heading};
use cs_math::StatisticsSummary;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Mean, median and their relative distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralTendencySection {
    pub mean: f64,
    pub median: f64,
    /// `|mean - median| / median * 100`; `None` when the median is zero.
    pub distance_pct: Option<f64>,
}

impl CentralTendencySection {
    pub fn new(summary: &StatisticsSummary, distance_pct: Option<f64>) -> Self {
        Self {
            mean: summary.mean,
            median: summary.median,
            distance_pct,
        }
    }

    /// Distance formatted for display, percent sign included.
    pub fn distance_formatted(&self) -> String {
        match self.distance_pct {
            Some(d) => format!("{:.2}%", d),
            None => fmt_opt2(None),
        }
    }

    pub fn write_text(&self, out: &mut String) {
        write_heading(out, "MEDIDAS DE TENDÊNCIA CENTRAL", 30);
        let _ = writeln!(
            out,
            "A média de veículos recuperados é: {:.2}",
            self.mean
        );
        let _ = writeln!(
            out,
            "A mediana de veículos recuperados é: {:.2}",
            self.median
        );
        let _ = writeln!(
            out,
            "A distância entre a média e a mediana de veículos recuperados é: {}",
            self.distance_formatted()
        );
    }
}
