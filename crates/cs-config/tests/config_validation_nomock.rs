//! No-mock configuration validation + resolution tests.
//!
//! Covers:
//! - Loading real JSON files from a temp directory
//! - Resolution order (CLI > env > config dir > XDG)
//! - Snapshot provenance

use cs_config::resolve::{resolve_config, ConfigSource};
use cs_config::{load_config, validate_config, Config, ConfigError, ValidationError};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const ENV_KEYS: &[&str] = &["CISP_STATS_CONFIG", "CISP_STATS_CONFIG_DIR", "XDG_CONFIG_HOME"];

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
            env::remove_var(key);
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    f()
}

fn write_config(path: &Path, json: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config parent");
    }
    fs::write(path, json).expect("write config");
}

#[test]
fn test_load_partial_file_keeps_defaults() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("config.json");
        write_config(
            &path,
            r#"{"source": {"url": "dados/local.csv"}, "report": {"top_n": 3}}"#,
        );

        let resolved = load_config(Some(&path)).expect("load config");
        assert_eq!(resolved.config.source.url, "dados/local.csv");
        assert_eq!(resolved.config.source.encoding, "iso-8859-1");
        assert_eq!(resolved.config.report.top_n, 3);
        assert_eq!(resolved.config.report.chart.bins, 50);
        assert_eq!(resolved.paths.source, ConfigSource::CliArgument);
        assert!(resolved.snapshot.from_file());
    });
}

#[test]
fn test_load_rejects_semantically_invalid_file() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("config.json");
        write_config(&path, r#"{"source": {"encoding": "not-a-charset"}}"#);

        let err = load_config(Some(&path)).expect_err("bad encoding should fail");
        assert!(matches!(
            err,
            ConfigError::ValidationError(ValidationError::InvalidValue { .. })
        ));
    });
}

#[test]
fn test_load_reports_broken_json_with_path() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("config.json");
        write_config(&path, "{ \"report\": ");

        let err = load_config(Some(&path)).expect_err("broken JSON should fail");
        match err {
            ConfigError::Invalid { path: p, source } => {
                assert_eq!(p, path);
                assert!(matches!(source, ValidationError::ParseError(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    });
}

#[test]
fn test_resolve_cli_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let cli = temp.path().join("cli").join("config.json");
        let env_file = temp.path().join("env").join("config.json");
        write_config(&cli, "{}");
        write_config(&env_file, "{}");

        env::set_var("CISP_STATS_CONFIG", env_file.display().to_string());

        let paths = resolve_config(Some(&cli));
        assert_eq!(paths.source, ConfigSource::CliArgument);
        assert_eq!(paths.config.unwrap(), cli);
    });
}

#[test]
fn test_resolve_env_over_config_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let env_file = temp.path().join("env").join("config.json");
        let dir = temp.path().join("dir");
        write_config(&env_file, "{}");
        write_config(&dir.join("config.json"), "{}");

        env::set_var("CISP_STATS_CONFIG", env_file.display().to_string());
        env::set_var("CISP_STATS_CONFIG_DIR", dir.display().to_string());

        let paths = resolve_config(None);
        assert_eq!(paths.source, ConfigSource::Environment);
        assert_eq!(paths.config.unwrap(), env_file);
    });
}

#[test]
fn test_resolve_config_dir_over_xdg() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("dir");
        let xdg = temp.path().join("xdg");
        write_config(&dir.join("config.json"), "{}");
        write_config(&xdg.join("cisp-stats").join("config.json"), "{}");

        env::set_var("CISP_STATS_CONFIG_DIR", dir.display().to_string());
        env::set_var("XDG_CONFIG_HOME", xdg.display().to_string());

        let paths = resolve_config(None);
        assert_eq!(paths.source, ConfigSource::Environment);
        assert_eq!(paths.config.unwrap(), dir.join("config.json"));
    });
}

#[cfg(target_os = "linux")]
#[test]
fn test_resolve_xdg_fallback() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let xdg = temp.path().join("xdg");
        let file = xdg.join("cisp-stats").join("config.json");
        write_config(&file, r#"{"report": {"top_n": 9}}"#);

        env::set_var("XDG_CONFIG_HOME", xdg.display().to_string());

        let paths = resolve_config(None);
        assert_eq!(paths.source, ConfigSource::XdgConfig);
        assert_eq!(paths.config.as_deref(), Some(file.as_path()));

        let resolved = load_config(None).expect("load from XDG");
        assert_eq!(resolved.config.report.top_n, 9);
    });
}

#[test]
fn test_round_trip_is_valid() {
    let config = Config::default();
    let json = config.to_json().expect("serialize");
    let parsed = Config::from_str(&json).expect("parse");
    validate_config(&parsed).expect("valid");
    assert_eq!(parsed, config);
}
