//! Structured logging for cisp-stats.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for scheduled/batch runs
//!
//! # Usage
//!
//! ```ignore
//! use cs_core::logging::{init_logging, LogConfig, LogContext, Stage, event_names};
//!
//! let config = LogConfig::from_env(None, None);
//! init_logging(&config);
//!
//! let ctx = LogContext::new(generate_run_id());
//! cs_core::log_event!(ctx, INFO, event_names::RUN_STARTED, Stage::Init, "Starting run");
//! ```
//!
//! stdout is reserved for the report payload; every log line goes to stderr.

pub mod config;
pub mod events;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use events::{event_names, LogContext, Stage};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Targets shown at the configured level: our crates plus the event-name
/// prefixes that `log_event!` uses as targets.
const LOG_TARGETS: &[&str] = &[
    "cs_core",
    "cs_report",
    "cisp_stats",
    "run",
    "config",
    "acquire",
    "parse",
    "aggregate",
    "compute",
    "classify",
    "report",
    "render",
];

fn build_filter(config: &LogConfig) -> EnvFilter {
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, config.level))
        .collect::<Vec<_>>()
        .join(",");

    if config.level_from_cli {
        return EnvFilter::new(directives);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs. A second call
/// is ignored. Respects CISP_STATS_LOG, RUST_LOG and CISP_STATS_LOG_FORMAT.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    // Already initialized (tests, embedding); keep the existing subscriber.
    let _ = result;
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars are plenty for a single run
    format!("run-{}", &uuid.simple().to_string()[..12])
}

/// Convenience macro for structured event logging with context.
///
/// Usage:
/// ```ignore
/// log_event!(ctx, INFO, event_names::ACQUIRE_STARTED, Stage::Acquire, "Fetching source");
/// log_event!(ctx, WARN, event_names::COMPUTE_DEGRADED, Stage::Compute, "Median is zero",
///     field = "distance_pct");
/// ```
#[macro_export]
macro_rules! log_event {
    ($ctx:expr, INFO, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::info!(
            target: $event,
            run_id = %$ctx.run_id,
            stage = %$stage,
            event = $event,
            $($key = $val,)*
            "{}", $msg
        )
    };
    ($ctx:expr, DEBUG, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::debug!(
            target: $event,
            run_id = %$ctx.run_id,
            stage = %$stage,
            event = $event,
            $($key = $val,)*
            "{}", $msg
        )
    };
    ($ctx:expr, WARN, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::warn!(
            target: $event,
            run_id = %$ctx.run_id,
            stage = %$stage,
            event = $event,
            $($key = $val,)*
            "{}", $msg
        )
    };
    ($ctx:expr, ERROR, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::error!(
            target: $event,
            run_id = %$ctx.run_id,
            stage = %$stage,
            event = $event,
            $($key = $val,)*
            "{}", $msg
        )
    };
}
