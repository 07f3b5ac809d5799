//! cisp-stats configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for config.json
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation and a JSON schema
//! - Config snapshots recorded in report metadata

pub mod resolve;
pub mod snapshot;
pub mod source;
pub mod validate;

pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use snapshot::ConfigSnapshot;
pub use source::{SourceConfig, DEFAULT_SOURCE_URL};
pub use validate::{validate_config, ValidationError, ValidationResult};

use cs_report::ReportConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Complete cisp-stats configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Where and how to read the input resource.
    #[serde(default)]
    pub source: SourceConfig,

    /// Report and chart output.
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_schema_version() -> String {
    CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            source: SourceConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Load a config file from disk.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_str(&content)
    }

    /// Parse a config from a JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// JSON schema for config.json.
pub fn config_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(Config)).unwrap_or(serde_json::Value::Null)
}

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid config file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    pub paths: ConfigPaths,
    pub snapshot: ConfigSnapshot,
}

/// Load configuration with the standard resolution order and validate it.
///
/// An explicit CLI path that does not exist is an error; every other
/// missing location silently falls through to the next one.
pub fn load_config(cli_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    if let Some(path) = cli_path {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
    }

    let paths = resolve_config(cli_path);
    let (config, content) = match &paths.config {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Invalid {
                path: path.clone(),
                source: ValidationError::IoError(e.to_string()),
            })?;
            let config = Config::from_str(&content).map_err(|source| ConfigError::Invalid {
                path: path.clone(),
                source,
            })?;
            (config, Some(content))
        }
        None => (Config::default(), None),
    };

    validate_config(&config)?;

    let snapshot = match content {
        Some(content) => ConfigSnapshot::new(&paths, &content),
        None => ConfigSnapshot::defaults_only(),
    };

    Ok(ResolvedConfig {
        config,
        paths,
        snapshot,
    })
}
