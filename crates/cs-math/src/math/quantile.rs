//! Order-statistic quantiles with linear interpolation.
//!
//! Both methods place quantile `p` at a 1-based position `h` among the `n`
//! sorted values and interpolate between the bracketing order statistics:
//!
//! - `Weibull` (Hyndman & Fan type 6): `h = p * (n + 1)`
//! - `Linear` (type 7): `h = 1 + p * (n - 1)`
//!
//! Positions outside `[1, n]` clamp to the first/last value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plotting-position convention for quantile estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantileMethod {
    /// Type 6, `h = p(n+1)`. Used for all reported quartiles.
    #[default]
    Weibull,
    /// Type 7, `h = 1 + p(n-1)`.
    Linear,
}

impl QuantileMethod {
    /// 1-based position of quantile `p` among `n` order statistics.
    pub fn position(self, p: f64, n: usize) -> f64 {
        let n = n as f64;
        match self {
            QuantileMethod::Weibull => p * (n + 1.0),
            QuantileMethod::Linear => 1.0 + p * (n - 1.0),
        }
    }
}

impl fmt::Display for QuantileMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantileMethod::Weibull => write!(f, "weibull"),
            QuantileMethod::Linear => write!(f, "linear"),
        }
    }
}

/// Quantile `p` of an ascending-sorted slice.
///
/// Returns NaN for empty input or `p` outside `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64, method: QuantileMethod) -> f64 {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    let h = method.position(p, n);
    if h <= 1.0 {
        return sorted[0];
    }
    if h >= n as f64 {
        return sorted[n - 1];
    }
    let lower = h.floor();
    let frac = h - lower;
    let idx = lower as usize - 1;
    let (a, b) = (sorted[idx], sorted[idx + 1]);
    // Rounding must not step outside the bracket.
    (a + frac * (b - a)).max(a).min(b)
}

/// Quantile `p` of unsorted values.
pub fn quantile(values: &[f64], p: f64, method: QuantileMethod) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, p, method)
}

/// First, second and third quartile of an ascending-sorted slice.
pub fn quartiles_sorted(sorted: &[f64], method: QuantileMethod) -> (f64, f64, f64) {
    (
        quantile_sorted(sorted, 0.25, method),
        quantile_sorted(sorted, 0.50, method),
        quantile_sorted(sorted, 0.75, method),
    )
}
