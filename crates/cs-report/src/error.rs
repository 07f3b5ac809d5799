//! Error types for report generation.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Chart drawing error.
    #[error("chart error: {0}")]
    ChartError(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required data.
    #[error("missing required data: {0}")]
    MissingData(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ReportError> for cs_common::Error {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::ChartError(msg) => cs_common::Error::Chart(msg),
            ReportError::IoError(e) => cs_common::Error::Chart(e.to_string()),
            ReportError::InvalidConfig(msg) => cs_common::Error::InvalidConfig(msg),
            other => cs_common::Error::Report(other.to_string()),
        }
    }
}
