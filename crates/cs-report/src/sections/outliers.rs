//! Outliers per precinct.

use super::{write_heading, write_table};
use cs_common::{Observation, OutlierClassification};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Lower and upper outliers, already in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutliersSection {
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Ascending by value.
    pub lower: Vec<Observation>,
    /// Descending by value.
    pub upper: Vec<Observation>,
    pub within_count: usize,
}

impl OutliersSection {
    pub fn from_classification(classification: &OutlierClassification) -> Self {
        Self {
            lower_fence: classification.fences.lower,
            upper_fence: classification.fences.upper,
            lower: classification.below.clone(),
            upper: classification.above.clone(),
            within_count: classification.within.len(),
        }
    }

    pub fn write_text(&self, out: &mut String) {
        write_heading(out, "OUTLIERS POR DELEGACIA", 25);

        write_heading(out, "Outliers inferiores", 20);
        if self.lower.is_empty() {
            let _ = writeln!(out, "Não existem outliers inferiores!");
        } else {
            write_table(out, &self.lower);
        }

        write_heading(out, "Outliers superiores", 20);
        if self.upper.is_empty() {
            let _ = writeln!(out, "Não existem outliers superiores!");
        } else {
            write_table(out, &self.upper);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_math::Fences;

    fn classification(below: Vec<Observation>, above: Vec<Observation>) -> OutlierClassification {
        OutlierClassification {
            fences: Fences {
                lower: 0.0,
                upper: 100.0,
            },
            below,
            above,
            within: vec![Observation::new("9", 50.0)],
        }
    }

    #[test]
    fn empty_sets_print_messages() {
        let section = OutliersSection::from_classification(&classification(vec![], vec![]));
        let mut out = String::new();
        section.write_text(&mut out);
        assert!(out.contains("Não existem outliers inferiores!"));
        assert!(out.contains("Não existem outliers superiores!"));
        assert_eq!(section.within_count, 1);
    }

    #[test]
    fn upper_outliers_printed_in_given_order() {
        let above = vec![Observation::new("12", 900.0), Observation::new("3", 400.0)];
        let section = OutliersSection::from_classification(&classification(vec![], above));
        let mut out = String::new();
        section.write_text(&mut out);

        let first = out.find("900").unwrap();
        let second = out.find("400").unwrap();
        assert!(first < second);
        assert!(out.contains("Não existem outliers inferiores!"));
        assert!(!out.contains("Não existem outliers superiores!"));
    }
}
