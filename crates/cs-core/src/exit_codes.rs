//! Exit codes for the cisp-stats CLI.
//!
//! Exit codes communicate the run outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-1: Report produced (fully or with degraded fields)
//! - 10-19: User/environment/data errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use cs_common::{Error, ErrorCategory};

/// Exit codes for cisp-stats operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Report produced (0-1)
    // ========================================================================
    /// Success: every section and the chart were produced
    Clean = 0,

    /// Report printed, but a measure or the chart was degraded
    Partial = 1,

    // ========================================================================
    // User / Environment / Data Errors (10-19)
    // ========================================================================
    /// Invalid arguments or configuration
    ArgsError = 10,

    /// Source could not be fetched or decoded
    AcquisitionError = 11,

    /// Source rows could not be parsed
    ParseError = 12,

    /// Statistics could not be computed (empty or non-finite data)
    ComputationError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if a report was produced (codes 0-1).
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean | ExitCode::Partial)
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        let code = self as i32;
        (10..20).contains(&code)
    }

    /// Check if this exit code is an internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        let code = self as i32;
        code >= 20
    }

    /// Check if this exit code indicates any error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Partial => "OK_PARTIAL",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::AcquisitionError => "ERR_ACQUISITION",
            ExitCode::ParseError => "ERR_PARSE",
            ExitCode::ComputationError => "ERR_COMPUTATION",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Map a fatal error to the exit code of its stage.
    pub fn for_error(err: &Error) -> Self {
        match err.category() {
            ErrorCategory::Config => ExitCode::ArgsError,
            ErrorCategory::Acquisition => ExitCode::AcquisitionError,
            ErrorCategory::Parse => ExitCode::ParseError,
            ErrorCategory::Computation => match err {
                Error::DuplicateKey { .. } => ExitCode::InternalError,
                _ => ExitCode::ComputationError,
            },
            ErrorCategory::Render => ExitCode::InternalError,
            ErrorCategory::Io => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
