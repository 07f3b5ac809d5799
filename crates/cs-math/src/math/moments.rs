//! Dispersion and shape measures built from central moments.
//!
//! Skewness and kurtosis use the bias-adjusted sample estimators (G1 and G2)
//! found in most statistical packages:
//!
//! ```text
//! G1 = n * sqrt(n - 1) / (n - 2) * S3 / S2^(3/2)
//! G2 = (n + 1) n (n - 1) / ((n - 2)(n - 3)) * S4 / S2^2
//!      - 3 (n - 1)^2 / ((n - 2)(n - 3))
//! ```
//!
//! where `Sk = sum((x - mean)^k)`. Results are `None` when the estimator is
//! undefined for the sample size, and `Some(0.0)` for a constant sample.

use super::central::mean;

/// Sums below this magnitude are treated as accumulated rounding error.
const FP_ZERO: f64 = 1e-14;

fn zero_out_fperr(x: f64) -> f64 {
    if x.abs() < FP_ZERO {
        0.0
    } else {
        x
    }
}

/// Sums of powered deviations from the mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralSums {
    pub n: usize,
    pub s2: f64,
    pub s3: f64,
    pub s4: f64,
}

/// Compute `sum((x - mean)^k)` for k = 2, 3, 4 in a single pass.
pub fn central_sums(values: &[f64]) -> CentralSums {
    let m = mean(values);
    let (mut s2, mut s3, mut s4) = (0.0, 0.0, 0.0);
    for &v in values {
        let d = v - m;
        let d2 = d * d;
        s2 += d2;
        s3 += d2 * d;
        s4 += d2 * d2;
    }
    CentralSums {
        n: values.len(),
        s2,
        s3,
        s4,
    }
}

/// Sample variance (n - 1 denominator). `None` for fewer than 2 values.
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sums = central_sums(values);
    Some(zero_out_fperr(sums.s2) / (sums.n as f64 - 1.0))
}

/// Sample standard deviation. `None` for fewer than 2 values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Bias-adjusted Fisher-Pearson skewness (G1). `None` for fewer than 3 values.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let sums = central_sums(values);
    if sums.n < 3 {
        return None;
    }
    let n = sums.n as f64;
    let s2 = zero_out_fperr(sums.s2);
    let s3 = zero_out_fperr(sums.s3);
    if s2 == 0.0 {
        return Some(0.0);
    }
    Some(n * (n - 1.0).sqrt() / (n - 2.0) * (s3 / s2.powf(1.5)))
}

/// Bias-adjusted excess kurtosis (G2). `None` for fewer than 4 values.
pub fn kurtosis(values: &[f64]) -> Option<f64> {
    let sums = central_sums(values);
    if sums.n < 4 {
        return None;
    }
    let n = sums.n as f64;
    let s2 = zero_out_fperr(sums.s2);
    let s4 = zero_out_fperr(sums.s4);

    let adj = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    let numerator = zero_out_fperr(n * (n + 1.0) * (n - 1.0) * s4);
    let denominator = zero_out_fperr((n - 2.0) * (n - 3.0) * s2 * s2);
    if denominator == 0.0 {
        return Some(0.0);
    }
    Some(numerator / denominator - adj)
}
