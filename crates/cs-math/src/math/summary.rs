//! The full descriptive summary of a sample.

use super::central::{mean, mean_median_distance_pct, median_sorted, sorted_copy};
use super::fences::{Fences, OutlierClass};
use super::moments::{kurtosis, skewness, std_dev, variance};
use super::quantile::{quartiles_sorted, QuantileMethod};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while summarizing a sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("cannot summarize an empty sample")]
    EmptyInput,

    #[error("non-finite value {value} at position {index}")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("mean-median distance is undefined because the median is zero (mean = {mean})")]
    ZeroMedian { mean: f64 },
}

/// Descriptive statistics over a non-empty sample of finite values.
///
/// Invariants: `q1 <= q2 <= q3`, `q2 == median`, `range == max - min`,
/// `fences.lower == q1 - 1.5 * iqr` and `fences.upper == q3 + 1.5 * iqr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub iqr: f64,
    pub fences: Fences,
    /// Sample variance; `None` below two values.
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    /// G1; `None` below three values.
    pub skewness: Option<f64>,
    /// Excess kurtosis (G2); `None` below four values.
    pub kurtosis: Option<f64>,
    pub quantile_method: QuantileMethod,
}

impl StatisticsSummary {
    /// Summarize `values` using Weibull quartiles.
    pub fn compute(values: &[f64]) -> Result<Self, StatsError> {
        Self::compute_with(values, QuantileMethod::Weibull)
    }

    /// Summarize `values` with an explicit quantile convention.
    pub fn compute_with(values: &[f64], method: QuantileMethod) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(StatsError::NonFiniteValue { index, value });
        }

        let sorted = sorted_copy(values);
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let median = median_sorted(&sorted);
        let (q1, _, q3) = quartiles_sorted(&sorted, method);
        // Both estimators agree on the median; reuse it so q2 matches exactly.
        let q2 = median;

        Ok(Self {
            count: values.len(),
            mean: mean(values),
            median,
            min,
            max,
            range: max - min,
            q1,
            q2,
            q3,
            iqr: q3 - q1,
            fences: Fences::from_quartiles(q1, q3),
            variance: variance(values),
            std_dev: std_dev(values),
            skewness: skewness(values),
            kurtosis: kurtosis(values),
            quantile_method: method,
        })
    }

    /// `|mean - median| / median * 100`.
    ///
    /// # Errors
    /// `StatsError::ZeroMedian` when the median is zero.
    pub fn distance_pct(&self) -> Result<f64, StatsError> {
        mean_median_distance_pct(self.mean, self.median)
            .ok_or(StatsError::ZeroMedian { mean: self.mean })
    }

    pub fn lower_fence(&self) -> f64 {
        self.fences.lower
    }

    pub fn upper_fence(&self) -> f64 {
        self.fences.upper
    }

    /// Position of `value` relative to this sample's fences.
    pub fn classify(&self, value: f64) -> OutlierClass {
        self.fences.classify(value)
    }
}
