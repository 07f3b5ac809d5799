//! No-mock report rendering tests.
//!
//! Covers:
//! - Text report with outliers and literal bottom ranking
//! - SVG chart written to a real temp directory
//! - Chart input validation

use cs_common::{Dataset, Observation, OutlierClassification, OutputFormat, Rankings};
use cs_math::{OutlierClass, StatisticsSummary};
use cs_report::chart::{render_svg, write_chart, BoxGeometry};
use cs_report::{ReportConfig, ReportError, ReportGenerator, ReportInputs, RunMetadata};
use tempfile::TempDir;

/// Small precinct sample with two upper outliers.
fn sample() -> Vec<(&'static str, f64)> {
    vec![
        ("1", 120.0),
        ("4", 95.0),
        ("5", 110.0),
        ("7", 2100.0),
        ("9", 130.0),
        ("10", 105.0),
        ("12", 98.0),
        ("15", 1800.0),
        ("18", 125.0),
        ("21", 101.0),
    ]
}

fn inputs(top_n: usize) -> ReportInputs {
    let dataset = Dataset::from_pairs(sample()).expect("unique keys");
    let summary = StatisticsSummary::compute(&dataset.values()).expect("non-empty");

    let mut below = Vec::new();
    let mut above = Vec::new();
    let mut within = Vec::new();
    for obs in dataset.iter() {
        match summary.classify(obs.value) {
            OutlierClass::Below => below.push(obs.clone()),
            OutlierClass::Above => above.push(obs.clone()),
            OutlierClass::Within => within.push(obs.clone()),
        }
    }
    above.sort_by(|a, b| b.value.total_cmp(&a.value));

    let sorted = dataset.sorted_desc();
    let bottom: Vec<Observation> = sorted[sorted.len().saturating_sub(top_n)..].to_vec();

    ReportInputs {
        metadata: RunMetadata {
            run_id: "run-test".into(),
            source: "fixture.csv".into(),
            source_sha256: "ab".repeat(32),
            source_bytes: 512,
            encoding: "windows-1252".into(),
            records: 40,
            precincts: dataset.len(),
            config_hash: None,
        },
        distance_pct: summary.distance_pct().ok(),
        classification: OutlierClassification {
            fences: summary.fences,
            below,
            above: above.clone(),
            within,
        },
        rankings: Rankings {
            n: top_n,
            top: above.into_iter().take(top_n).collect(),
            bottom,
        },
        dataset,
        summary,
    }
}

#[test]
fn text_report_lists_outliers_and_rankings() {
    let generator = ReportGenerator::new(ReportConfig::default());
    let data = generator.build(inputs(5));
    let text = generator
        .render(&data, OutputFormat::Text)
        .expect("render text");

    assert!(text.contains("Não existem outliers inferiores!"));
    let upper = text.find("Outliers superiores").expect("upper heading");
    let p7 = text[upper..].find("2100").expect("precinct 7 listed");
    let p15 = text[upper..].find("1800").expect("precinct 15 listed");
    assert!(p7 < p15, "upper outliers must be descending");

    // Bottom ranking is the tail of the full dataset sorted descending.
    let bottom = text.find("MENOR ÍNDICE").expect("bottom heading");
    let tail = &text[bottom..];
    for value in ["105", "101", "98", "95"] {
        assert!(tail.contains(value), "missing {value} in bottom ranking");
    }
    assert!(tail.find("101").unwrap() < tail.find("95").unwrap());
}

#[test]
fn box_geometry_stops_whiskers_at_fences() {
    let generator = ReportGenerator::new(ReportConfig::default());
    let data = generator.build(inputs(5));
    let geom = BoxGeometry::from_report(&data);

    assert_eq!(geom.outliers.len(), 2);
    assert!(geom.upper_whisker <= data.position.upper_fence);
    // Largest inlier (130) sits below Q3, so the whisker collapses onto the box.
    assert_eq!(geom.upper_whisker, data.position.q3);
    assert_eq!(geom.lower_whisker, 95.0);
}

#[test]
fn chart_written_to_disk() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("charts").join("recuperacao.svg");
    let config = ReportConfig::default().with_chart_path(&path);

    let generator = ReportGenerator::new(config);
    let data = generator.build(inputs(5));
    write_chart(&data, &generator.config().chart).expect("chart written");

    let svg = std::fs::read_to_string(&path).expect("read chart");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Medidas Observadas"));
}

#[test]
fn chart_rejects_zero_bins() {
    let mut config = ReportConfig::default();
    config.chart.bins = 0;
    let generator = ReportGenerator::new(config);
    let data = generator.build(inputs(5));

    let err = render_svg(&data, &generator.config().chart).unwrap_err();
    assert!(matches!(err, ReportError::InvalidConfig(_)));
}
