//! Structured event definitions for logging.
//!
//! Every pipeline event carries the run id and the stage it belongs to, so a
//! JSONL log can be filtered per run and per stage.

use serde::{Deserialize, Serialize};

/// Stages of the cisp-stats pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration.
    Init,
    /// Fetching and decoding the source resource.
    Acquire,
    /// CSV rows to typed records.
    Parse,
    /// Summing records per precinct.
    Aggregate,
    /// Descriptive statistics.
    Compute,
    /// Outlier partition and rankings.
    Classify,
    /// Report text / JSON.
    Report,
    /// SVG chart.
    Render,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Acquire => "acquire",
            Stage::Parse => "parse",
            Stage::Aggregate => "aggregate",
            Stage::Compute => "compute",
            Stage::Classify => "classify",
            Stage::Report => "report",
            Stage::Render => "render",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";
    pub const RUN_FAILED: &str = "run.failed";

    // Config/init events
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";

    // Acquire stage
    pub const ACQUIRE_STARTED: &str = "acquire.started";
    pub const ACQUIRE_FINISHED: &str = "acquire.finished";
    pub const ACQUIRE_DECODE_LOSSY: &str = "acquire.decode_lossy";

    // Parse / aggregate stages
    pub const PARSE_FINISHED: &str = "parse.finished";
    pub const AGGREGATE_FINISHED: &str = "aggregate.finished";

    // Compute stage
    pub const COMPUTE_FINISHED: &str = "compute.finished";
    pub const COMPUTE_DEGRADED: &str = "compute.degraded";

    // Classify stage
    pub const CLASSIFY_FINISHED: &str = "classify.finished";

    // Output stages
    pub const REPORT_RENDERED: &str = "report.rendered";
    pub const CHART_WRITTEN: &str = "render.chart_written";
    pub const CHART_SKIPPED: &str = "render.chart_skipped";
    pub const CHART_FAILED: &str = "render.chart_failed";
}

/// Run-scoped context passed to `log_event!`.
#[derive(Debug, Clone)]
pub struct LogContext {
    /// Unique ID for this invocation.
    pub run_id: String,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
        }
    }
}
