//! cisp-stats core library.
//!
//! Downloads the ISP-RJ monthly precinct file, sums vehicle recoveries per
//! police precinct (`cisp`) and produces descriptive statistics, IQR outlier
//! lists, rankings and a chart.
//!
//! The pipeline is a straight line of pure stages:
//!
//! ```text
//! acquire (fetch, decode) → parse → aggregate → compute → classify → report/render
//! ```
//!
//! Each stage lives in its own module; [`pipeline`] wires them together with
//! structured logging and maps failures onto [`exit_codes::ExitCode`].

pub mod acquire;
pub mod aggregate;
pub mod classify;
pub mod exit_codes;
pub mod logging;
pub mod pipeline;

pub use exit_codes::ExitCode;
pub use pipeline::{analyze, load_dataset, run, Analysis, ChartStatus, LoadedDataset, RunOutcome};
