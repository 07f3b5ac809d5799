//! cisp-stats common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - Precinct observations and the aggregated dataset
//! - Outlier partition and ranking result types
//! - The stage-tagged error taxonomy
//! - Output format specifications

pub mod classification;
pub mod error;
pub mod observation;
pub mod output;

pub use classification::{OutlierClassification, Rankings};
pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use observation::{Dataset, Observation, PrecinctCode};
pub use output::OutputFormat;
