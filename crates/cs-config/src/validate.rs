//! Configuration validation errors and semantic validation.

use crate::Config;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a configuration semantically.
pub fn validate_config(config: &Config) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    let source = &config.source;
    if source.url.trim().is_empty() {
        return Err(invalid("source.url", "Must not be empty"));
    }
    if encoding_rs::Encoding::for_label(source.encoding.trim().as_bytes()).is_none() {
        return Err(invalid(
            "source.encoding",
            format!("Unknown encoding label '{}'", source.encoding),
        ));
    }
    match source.delimiter_byte() {
        Some(b'\n') | Some(b'\r') | Some(b'"') | None => {
            return Err(invalid(
                "source.delimiter",
                format!(
                    "Must be a single ASCII character other than a quote or newline, got {:?}",
                    source.delimiter
                ),
            ));
        }
        Some(_) => {}
    }
    if source.timeout_secs == 0 {
        return Err(invalid("source.timeout_secs", "Must be positive, got 0"));
    }
    if source.max_bytes == 0 {
        return Err(invalid("source.max_bytes", "Must be positive, got 0"));
    }

    let report = &config.report;
    if report.top_n == 0 {
        return Err(invalid("report.top_n", "Must be positive, got 0"));
    }
    let chart = &report.chart;
    if chart.width == 0 || chart.height == 0 {
        return Err(invalid(
            "report.chart",
            format!(
                "Width and height must be positive, got {}x{}",
                chart.width, chart.height
            ),
        ));
    }
    if chart.bins == 0 {
        return Err(invalid("report.chart.bins", "Must be positive, got 0"));
    }
    if chart.enabled && chart.path.as_os_str().is_empty() {
        return Err(invalid(
            "report.chart.path",
            "Must not be empty while the chart is enabled",
        ));
    }

    Ok(())
}
