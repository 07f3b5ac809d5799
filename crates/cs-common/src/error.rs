//! Error types for cisp-stats.
//!
//! Every failure is tagged with the pipeline stage it belongs to:
//! - Stable error codes for machine parsing
//! - Category classification per stage (acquisition, parse, computation, render)
//! - A fatality flag: acquisition and parse failures abort the run, while a
//!   zero median or a failed chart only degrades the output
//! - Remediation hints for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Data Acquisition Failed
//!   Reason: failed to fetch https://...: connection refused
//!   Fix: Check network connectivity, or point --source at a local copy of the CSV.
//! ```

use cs_math::StatsError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for cisp-stats operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories, one per pipeline stage plus config and I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration file or CLI argument errors.
    Config,
    /// Fetching or decoding the source resource.
    Acquisition,
    /// Turning CSV rows into typed records.
    Parse,
    /// Aggregation and descriptive statistics.
    Computation,
    /// Report and chart output.
    Render,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Acquisition => write!(f, "acquisition"),
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Computation => write!(f, "computation"),
            ErrorCategory::Render => write!(f, "render"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for cisp-stats.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Acquisition errors (20-29)
    #[error("failed to fetch {origin}: {reason}")]
    Fetch { origin: String, reason: String },

    #[error("{origin} answered with HTTP status {status}")]
    HttpStatus { origin: String, status: u16 },

    #[error("{origin} exceeds the {limit} byte download limit")]
    PayloadTooLarge { origin: String, limit: u64 },

    #[error("unknown character encoding: {0}")]
    UnknownEncoding(String),

    // Parse errors (30-39)
    #[error("required column '{column}' not found in header")]
    MissingColumn { column: String },

    #[error("line {line}: column '{column}' holds '{value}', which is not a number")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    #[error("malformed CSV: {0}")]
    MalformedCsv(String),

    // Computation errors (40-49)
    #[error("statistics failed: {0}")]
    Stats(#[from] StatsError),

    #[error("precinct '{key}' appears more than once in the aggregated dataset")]
    DuplicateKey { key: String },

    // Render errors (50-59)
    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("report rendering failed: {0}")]
    Report(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Acquisition errors
    /// - 30-39: Parse errors
    /// - 40-49: Computation errors
    /// - 50-59: Render errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig(_) => 11,
            Error::Fetch { .. } => 20,
            Error::HttpStatus { .. } => 21,
            Error::PayloadTooLarge { .. } => 22,
            Error::UnknownEncoding(_) => 23,
            Error::MissingColumn { .. } => 30,
            Error::InvalidNumber { .. } => 31,
            Error::MalformedCsv(_) => 32,
            Error::Stats(StatsError::EmptyInput) => 40,
            Error::Stats(StatsError::NonFiniteValue { .. }) => 41,
            Error::Stats(StatsError::ZeroMedian { .. }) => 42,
            Error::DuplicateKey { .. } => 43,
            Error::Chart(_) => 50,
            Error::Report(_) => 51,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidConfig(_) => ErrorCategory::Config,

            Error::Fetch { .. }
            | Error::HttpStatus { .. }
            | Error::PayloadTooLarge { .. }
            | Error::UnknownEncoding(_) => ErrorCategory::Acquisition,

            Error::MissingColumn { .. } | Error::InvalidNumber { .. } | Error::MalformedCsv(_) => {
                ErrorCategory::Parse
            }

            Error::Stats(_) | Error::DuplicateKey { .. } => ErrorCategory::Computation,

            Error::Chart(_) | Error::Report(_) => ErrorCategory::Render,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Whether the error must abort the run.
    ///
    /// Non-fatal errors leave the rest of the report intact: a zero median
    /// only blanks the distance measure, a chart failure only drops the chart.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::Stats(StatsError::ZeroMedian { .. }) | Error::Chart(_)
        )
    }

    /// Returns whether retrying the same run could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Fetch { .. } | Error::HttpStatus { .. } | Error::Io(_))
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::InvalidConfig(_) => {
                "Run 'cisp-stats config validate' to check the file, or remove it to use built-in defaults."
            }

            Error::Fetch { .. } => {
                "Check network connectivity, or point --source at a local copy of the CSV."
            }
            Error::HttpStatus { .. } => {
                "The data portal rejected the request. Retry later or use --source with a local copy."
            }
            Error::PayloadTooLarge { .. } => {
                "Raise source.max_bytes in the config file if the dataset has legitimately grown."
            }
            Error::UnknownEncoding(_) => {
                "Use a WHATWG encoding label such as 'iso-8859-1', 'windows-1252' or 'utf-8'."
            }

            Error::MissingColumn { .. } => {
                "The file layout changed or the wrong delimiter is configured. Inspect the header line."
            }
            Error::InvalidNumber { .. } => {
                "Fix or remove the offending row; numeric cells must be plain numbers. Empty cells are rejected, not read as zero; fill the gap or drop the row."
            }
            Error::MalformedCsv(_) => {
                "Check the delimiter and encoding settings against the source file."
            }

            Error::Stats(StatsError::EmptyInput) => {
                "The source produced no rows. Verify the file is not empty or truncated."
            }
            Error::Stats(StatsError::NonFiniteValue { .. }) => {
                "A value overflowed or is not finite. Inspect the aggregated totals."
            }
            Error::Stats(StatsError::ZeroMedian { .. }) => {
                "Most precincts report zero, so the relative distance is undefined. Other measures are unaffected."
            }
            Error::DuplicateKey { .. } => {
                "Internal aggregation error. Please report it with the source file."
            }

            Error::Chart(_) => {
                "The text report is complete. Check the chart path is writable, or pass --no-chart."
            }
            Error::Report(_) => "Retry with a different --format.",

            Error::Io(_) => "Check disk space and permissions, then retry.",
            Error::Json(_) => "Invalid JSON. Check the file syntax or restore it from a backup.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidConfig(_) => "Invalid Configuration",

            Error::Fetch { .. } => "Data Acquisition Failed",
            Error::HttpStatus { .. } => "Unexpected HTTP Status",
            Error::PayloadTooLarge { .. } => "Download Too Large",
            Error::UnknownEncoding(_) => "Unknown Encoding",

            Error::MissingColumn { .. } => "Missing Column",
            Error::InvalidNumber { .. } => "Invalid Number",
            Error::MalformedCsv(_) => "Malformed CSV",

            Error::Stats(StatsError::EmptyInput) => "Empty Dataset",
            Error::Stats(StatsError::NonFiniteValue { .. }) => "Non-Finite Value",
            Error::Stats(StatsError::ZeroMedian { .. }) => "Median Is Zero",
            Error::DuplicateKey { .. } => "Duplicate Precinct",

            Error::Chart(_) => "Chart Not Rendered",
            Error::Report(_) => "Report Not Rendered",

            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the run was aborted.
    pub fatal: bool,

    /// Whether a retry could succeed.
    pub retryable: bool,

    /// Additional structured context (e.g. line, column).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::Fetch { origin, .. } | Error::PayloadTooLarge { origin, .. } => {
                context.insert("origin".to_string(), serde_json::json!(origin));
            }
            Error::HttpStatus { origin, status } => {
                context.insert("origin".to_string(), serde_json::json!(origin));
                context.insert("status".to_string(), serde_json::json!(status));
            }
            Error::MissingColumn { column } => {
                context.insert("column".to_string(), serde_json::json!(column));
            }
            Error::InvalidNumber { line, column, value } => {
                context.insert("line".to_string(), serde_json::json!(line));
                context.insert("column".to_string(), serde_json::json!(column));
                context.insert("value".to_string(), serde_json::json!(value));
            }
            Error::DuplicateKey { key } => {
                context.insert("key".to_string(), serde_json::json!(key));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            fatal: err.is_fatal(),
            retryable: err.is_retryable(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
