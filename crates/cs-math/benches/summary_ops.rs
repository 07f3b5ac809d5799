//! Criterion benchmarks for `cs-math`.
//!
//! Sample sizes bracket the real dataset (a few hundred precincts).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cs_math::{kurtosis, quantile, skewness, QuantileMethod, StatisticsSummary};

fn synthetic_counts(n: usize) -> Vec<f64> {
    // Deterministic right-skewed sample: mostly small counts, a few large.
    (0..n)
        .map(|i| {
            let base = (i * 37 % 101) as f64;
            if i % 17 == 0 {
                base * 25.0
            } else {
                base
            }
        })
        .collect()
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for n in [50usize, 150, 1_000, 10_000] {
        let values = synthetic_counts(n);

        group.bench_with_input(BenchmarkId::new("compute", n), &values, |b, v| {
            b.iter(|| black_box(StatisticsSummary::compute(black_box(v))));
        });

        group.bench_with_input(BenchmarkId::new("weibull_q3", n), &values, |b, v| {
            b.iter(|| black_box(quantile(black_box(v), 0.75, QuantileMethod::Weibull)));
        });

        group.bench_with_input(BenchmarkId::new("shape", n), &values, |b, v| {
            b.iter(|| {
                black_box(skewness(black_box(v)));
                black_box(kurtosis(black_box(v)));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_summary);
criterion_main!(benches);
