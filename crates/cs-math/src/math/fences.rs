//! Interquartile-range outlier fences.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiple of the IQR between a quartile and its fence.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Where a value falls relative to the fences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierClass {
    /// Strictly below the lower fence.
    Below,
    /// Between the fences, inclusive.
    Within,
    /// Strictly above the upper fence.
    Above,
}

impl fmt::Display for OutlierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlierClass::Below => write!(f, "below"),
            OutlierClass::Within => write!(f, "within"),
            OutlierClass::Above => write!(f, "above"),
        }
    }
}

/// Lower and upper outlier thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fences {
    pub lower: f64,
    pub upper: f64,
}

impl Fences {
    /// Fences at `q1 - 1.5 * iqr` and `q3 + 1.5 * iqr`.
    pub fn from_quartiles(q1: f64, q3: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            lower: q1 - IQR_MULTIPLIER * iqr,
            upper: q3 + IQR_MULTIPLIER * iqr,
        }
    }

    pub fn classify(&self, value: f64) -> OutlierClass {
        if value < self.lower {
            OutlierClass::Below
        } else if value > self.upper {
            OutlierClass::Above
        } else {
            OutlierClass::Within
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.classify(value) == OutlierClass::Within
    }
}
