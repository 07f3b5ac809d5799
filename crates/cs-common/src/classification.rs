//! Outlier partition and rankings over a [`Dataset`](crate::Dataset).
//!
//! These are plain result types. The classifier that fills them lives in
//! `cs-core`; the reporter only reads them.

use crate::observation::Observation;
use cs_math::Fences;
use serde::{Deserialize, Serialize};

/// Partition of a dataset by the IQR fences.
///
/// `below` is sorted ascending and `above` descending for display;
/// `within` keeps dataset order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierClassification {
    pub fences: Fences,
    pub below: Vec<Observation>,
    pub above: Vec<Observation>,
    pub within: Vec<Observation>,
}

impl OutlierClassification {
    /// Number of observations across all three sets.
    pub fn total(&self) -> usize {
        self.below.len() + self.above.len() + self.within.len()
    }

    pub fn outlier_count(&self) -> usize {
        self.below.len() + self.above.len()
    }

    pub fn has_outliers(&self) -> bool {
        self.outlier_count() > 0
    }
}

/// Top and bottom rankings printed in the conclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    /// Requested ranking length.
    pub n: usize,
    /// Upper outliers, largest first, at most `n`.
    pub top: Vec<Observation>,
    /// Last `n` of the full dataset sorted largest first.
    pub bottom: Vec<Observation>,
}
