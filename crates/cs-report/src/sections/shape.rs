//! Distribution shape section.

use super::fmt_opt2;
use cs_math::StatisticsSummary;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Skewness (G1) and excess kurtosis (G2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSection {
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

impl ShapeSection {
    pub fn from_summary(summary: &StatisticsSummary) -> Self {
        Self {
            skewness: summary.skewness,
            kurtosis: summary.kurtosis,
        }
    }

    /// Short reading of the skewness sign.
    pub fn skew_label(&self) -> &'static str {
        match self.skewness {
            Some(g1) if g1 > 0.0 => "assimetria à direita",
            Some(g1) if g1 < 0.0 => "assimetria à esquerda",
            Some(_) => "simétrica",
            None => super::UNDEFINED,
        }
    }

    pub fn write_text(&self, out: &mut String) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Medidas de distribuição:");
        let _ = writeln!(out, "{}", "-".repeat(30));
        match self.skewness {
            Some(g1) => {
                let _ = writeln!(out, "Assimetria: {:.2} ({})", g1, self.skew_label());
            }
            None => {
                let _ = writeln!(out, "Assimetria: {}", super::UNDEFINED);
            }
        }
        let _ = writeln!(out, "Curtose: {}", fmt_opt2(self.kurtosis));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_sample() {
        let s = StatisticsSummary::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let section = ShapeSection::from_summary(&s);
        let mut out = String::new();
        section.write_text(&mut out);
        assert!(out.contains("Assimetria: 0.00 (simétrica)"));
        assert!(out.contains("Curtose: -1.20"));
    }

    #[test]
    fn short_sample_is_undefined() {
        let s = StatisticsSummary::compute(&[1.0, 2.0]).unwrap();
        let section = ShapeSection::from_summary(&s);
        let mut out = String::new();
        section.write_text(&mut out);
        assert!(out.contains("Assimetria: indefinida\n"));
        assert!(!out.contains("("));
        assert!(out.contains("Curtose: indefinida"));
    }

    #[test]
    fn right_tail() {
        let s = StatisticsSummary::compute(&[1.0, 2.0, 3.0, 10.0]).unwrap();
        assert_eq!(ShapeSection::from_summary(&s).skew_label(), "assimetria à direita");
    }
}
