//! No-mock pipeline tests against real ISO-8859-1 files on disk.
//!
//! Covers:
//! - Full run: aggregation, statistics, rankings, chart file
//! - Degraded runs (zero median, unwritable chart path) finish as partial
//! - Fatal parse and acquisition errors map to their exit codes

use cs_common::{Error, OutputFormat};
use cs_config::Config;
use cs_core::logging::LogContext;
use cs_core::{load_dataset, pipeline, ChartStatus, ExitCode};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "cisp;mes;ano;mes_ano;aisp;risp;munic;mcirc;regiao;recuperacao_veiculos";

/// Two monthly rows per precinct; sums give two upper outliers (21, 25).
const MONTHLY: &[(&str, &str, u32, u32)] = &[
    ("1", "Rio de Janeiro", 100, 20),
    ("5", "Rio de Janeiro", 90, 40),
    ("7", "Niterói", 60, 50),
    ("10", "São Gonçalo", 70, 70),
    ("12", "Rio de Janeiro", 100, 25),
    ("17", "Duque de Caxias", 80, 35),
    ("19", "Nova Iguaçu", 50, 55),
    ("21", "Rio de Janeiro", 1500, 600),
    ("25", "São João de Meriti", 900, 900),
    ("33", "Maricá", 60, 35),
];

fn latin1(text: &str) -> Vec<u8> {
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(text);
    assert!(!unmappable, "fixture must be Latin-1 encodable");
    bytes.into_owned()
}

fn fixture_text(rows: &[(&str, &str, u32, u32)]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for month in 1..=2 {
        for (cisp, munic, jan, feb) in rows {
            let value = if month == 1 { jan } else { feb };
            text.push_str(&format!(
                "{cisp};{month};2023;2023m{month:02};1;1;{munic};001;Capital;{value}\n"
            ));
        }
    }
    text
}

fn write_fixture(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("BaseDPEvolucaoMensalCisp.csv");
    fs::write(&path, latin1(text)).expect("write fixture");
    path
}

fn config_for(source: &Path, chart: PathBuf) -> Config {
    let mut config = Config::default();
    config.source.url = source.display().to_string();
    config.report = config.report.with_chart_path(chart);
    config
}

fn ctx() -> LogContext {
    LogContext::new("run-pipeline-test")
}

#[test]
fn test_full_run_is_clean() {
    let temp = TempDir::new().expect("temp dir");
    let source = write_fixture(temp.path(), &fixture_text(MONTHLY));
    let chart = temp.path().join("out").join("chart.svg");
    let config = config_for(&source, chart.clone());

    let outcome = pipeline::run(&config, None, OutputFormat::Text, &ctx()).expect("run");

    assert_eq!(outcome.exit_code, ExitCode::Clean);
    assert!(outcome.report.warnings.is_empty());
    assert_eq!(outcome.chart, ChartStatus::Written(chart.clone()));
    let svg = fs::read_to_string(&chart).expect("chart written");
    assert!(svg.contains("<svg"));

    let report = &outcome.report;
    assert_eq!(report.metadata.records, 20);
    assert_eq!(report.metadata.precincts, 10);
    assert_eq!(report.metadata.source_sha256.len(), 64);
    assert_eq!(report.dataset.get("21"), Some(2100.0));
    assert_eq!(report.dataset.get("7"), Some(110.0));

    assert_eq!(report.central.mean, 484.0);
    assert_eq!(report.central.median, 122.5);
    assert_eq!(report.central.distance_formatted(), "295.10%");
    assert_eq!(report.position.q1, 108.75);
    assert_eq!(report.position.q3, 555.0);

    let top: Vec<&str> = report.rankings.top.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(top, vec!["21", "25"]);
    let bottom: Vec<&str> = report.rankings.bottom.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(bottom, vec!["1", "17", "7", "19", "33"]);

    assert!(outcome.output.contains("295.10%"));
    assert!(outcome.output.contains("Não existem outliers inferiores!"));
}

#[test]
fn test_json_output_parses() {
    let temp = TempDir::new().expect("temp dir");
    let source = write_fixture(temp.path(), &fixture_text(MONTHLY));
    let mut config = config_for(&source, temp.path().join("chart.svg"));
    config.report = config.report.with_chart(false);

    let outcome = pipeline::run(&config, Some("abc123".into()), OutputFormat::Json, &ctx())
        .expect("run");
    assert_eq!(outcome.chart, ChartStatus::Disabled);
    assert_eq!(outcome.exit_code, ExitCode::Clean);

    let doc: serde_json::Value = serde_json::from_str(&outcome.output).expect("valid JSON");
    assert_eq!(doc["metadata"]["precincts"], 10);
    assert_eq!(doc["metadata"]["config_hash"], "abc123");
    assert_eq!(doc["rankings"]["top"][0]["key"], "21");
}

#[test]
fn test_zero_median_is_partial() {
    let temp = TempDir::new().expect("temp dir");
    let rows: &[(&str, &str, u32, u32)] = &[
        ("1", "Rio", 0, 0),
        ("2", "Rio", 0, 0),
        ("3", "Rio", 0, 0),
        ("4", "Rio", 5, 4),
        ("5", "Rio", 0, 0),
    ];
    let source = write_fixture(temp.path(), &fixture_text(rows));
    let mut config = config_for(&source, temp.path().join("chart.svg"));
    config.report = config.report.with_chart(false);

    let outcome = pipeline::run(&config, None, OutputFormat::Json, &ctx()).expect("run");
    assert_eq!(outcome.exit_code, ExitCode::Partial);
    assert_eq!(outcome.report.central.distance_pct, None);
    assert_eq!(outcome.report.central.distance_formatted(), "indefinida");
    assert_eq!(outcome.report.warnings.len(), 1);
    assert_eq!(outcome.report.warnings[0].code, 42);

    let doc: serde_json::Value = serde_json::from_str(&outcome.output).expect("valid JSON");
    assert_eq!(doc["warnings"][0]["code"], 42);
    assert_eq!(doc["warnings"][0]["stage"], "compute");
}

#[test]
fn test_unwritable_chart_is_partial() {
    let temp = TempDir::new().expect("temp dir");
    let source = write_fixture(temp.path(), &fixture_text(MONTHLY));
    // A directory where the file should go.
    let chart = temp.path().join("occupied");
    fs::create_dir_all(&chart).expect("mkdir");
    let config = config_for(&source, chart);

    let outcome = pipeline::run(&config, None, OutputFormat::Text, &ctx()).expect("run");
    assert_eq!(outcome.exit_code, ExitCode::Partial);
    assert!(matches!(outcome.chart, ChartStatus::Failed(_)));
    assert!(outcome.output.contains("TOP 5 DELEGACIAS"));
    assert_eq!(outcome.report.warnings.len(), 1);
    assert_eq!(outcome.report.warnings[0].code, 50);
    assert_eq!(outcome.report.warnings[0].stage, "render");
}

#[test]
fn test_bad_number_aborts_with_line() {
    let temp = TempDir::new().expect("temp dir");
    let mut text = fixture_text(MONTHLY);
    text.push_str("40;2;2023;2023m02;1;1;Rio;001;Capital;dez\n");
    let source = write_fixture(temp.path(), &text);
    let config = config_for(&source, temp.path().join("chart.svg"));

    let err = pipeline::run(&config, None, OutputFormat::Text, &ctx()).unwrap_err();
    match &err {
        Error::InvalidNumber { line, value, .. } => {
            assert_eq!(*line, 22);
            assert_eq!(value, "dez");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ExitCode::for_error(&err), ExitCode::ParseError);
    assert!(!temp.path().join("chart.svg").exists());
}

#[test]
fn test_header_only_is_empty_dataset() {
    let temp = TempDir::new().expect("temp dir");
    let source = write_fixture(temp.path(), &format!("{HEADER}\n"));
    let config = config_for(&source, temp.path().join("chart.svg"));

    let err = pipeline::run(&config, None, OutputFormat::Text, &ctx()).unwrap_err();
    assert_eq!(err.code(), 40);
    assert_eq!(ExitCode::for_error(&err), ExitCode::ComputationError);
}

#[test]
fn test_missing_source_is_acquisition_error() {
    let temp = TempDir::new().expect("temp dir");
    let config = config_for(&temp.path().join("absent.csv"), temp.path().join("chart.svg"));

    let err = load_dataset(&config.source, &ctx()).unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::AcquisitionError);
}

#[test]
fn test_file_url_and_latin1_names() {
    let temp = TempDir::new().expect("temp dir");
    let source = write_fixture(temp.path(), &fixture_text(MONTHLY));
    let mut config = Config::default();
    config.source.url = format!("file://{}", source.display());

    let loaded = load_dataset(&config.source, &ctx()).expect("load");
    assert_eq!(loaded.records, 20);
    assert_eq!(loaded.dataset.len(), 10);
    assert_eq!(loaded.encoding, "windows-1252");
    let keys: Vec<&str> = loaded.dataset.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys[..3], ["1", "5", "7"]);
}

#[test]
fn test_size_limit_applies_to_files() {
    let temp = TempDir::new().expect("temp dir");
    let source = write_fixture(temp.path(), &fixture_text(MONTHLY));
    let mut config = config_for(&source, temp.path().join("chart.svg"));
    config.source.max_bytes = 64;

    let err = load_dataset(&config.source, &ctx()).unwrap_err();
    assert_eq!(err.code(), 22);
}
