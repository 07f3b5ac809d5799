//! Fuzz target for the statistics engine.
//!
//! Any sample must produce a summary or an error without panicking; samples
//! of count-sized values must also keep the quartiles ordered.

#![no_main]

use cs_math::StatisticsSummary;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|values: Vec<f64>| {
    let Ok(summary) = StatisticsSummary::compute(&values) else {
        return;
    };
    if values.iter().all(|v| v.abs() < 1e12) {
        assert!(summary.q1 <= summary.q2 && summary.q2 <= summary.q3);
        assert!(summary.min <= summary.max);
    }
});
