//! Report generator for cisp-stats runs.
//!
//! Turns a computed summary, outlier partition and rankings into:
//!
//! - A sectioned text report (central tendency, dispersion, position,
//!   outliers, conclusion with rankings, distribution shape)
//! - A JSON document carrying the same sections plus run metadata
//! - A one-line summary
//! - A four-panel SVG chart (box plot, histogram, two text panels)
//!
//! # Example
//!
//! ```no_run
//! use cs_report::{chart, ReportConfig, ReportGenerator, ReportInputs};
//! use cs_common::OutputFormat;
//!
//! # fn inputs() -> ReportInputs { unimplemented!() }
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let data = generator.build(inputs());
//! print!("{}", generator.render(&data, OutputFormat::Text).unwrap());
//! chart::write_chart(&data, &generator.config().chart).unwrap();
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod generator;
pub mod sections;

pub use config::{ChartConfig, ReportConfig};
pub use error::{ReportError, Result};
pub use generator::{ReportData, ReportGenerator, ReportInputs, ReportWarning};
pub use sections::RunMetadata;
