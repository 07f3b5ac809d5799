//! Central tendency and range measures.
//!
//! Functions here follow the same convention as the rest of the crate:
//! degenerate input yields NaN (or `None`) instead of panicking, and the
//! caller decides whether that is an error.

/// Arithmetic mean.
///
/// Returns NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Ascending copy of `values`, ordered with `f64::total_cmp`.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Median of an ascending-sorted slice.
///
/// Odd lengths return the middle element; even lengths return the midpoint
/// of the two middle elements. Returns NaN for empty input.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    debug_assert!(
        sorted.windows(2).all(|w| w[0] <= w[1]),
        "values must be sorted in ascending order"
    );
    let mid = n / 2;
    if n % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Median of unsorted values.
pub fn median(values: &[f64]) -> f64 {
    median_sorted(&sorted_copy(values))
}

/// Smallest and largest value, or `None` for empty input.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Total range (max - min). NaN for empty input.
pub fn range(values: &[f64]) -> f64 {
    match min_max(values) {
        Some((lo, hi)) => hi - lo,
        None => f64::NAN,
    }
}

/// Distance between mean and median as a percentage of the median:
/// `|mean - median| / median * 100`.
///
/// Returns `None` when the median is zero, where the ratio is undefined.
pub fn mean_median_distance_pct(mean: f64, median: f64) -> Option<f64> {
    if median == 0.0 || mean.is_nan() || median.is_nan() {
        return None;
    }
    Some(((mean - median) / median).abs() * 100.0)
}
