//! End-to-end run: acquire → parse → aggregate → compute → classify → report.
//!
//! Fatal errors return early with the stage logged. A zero median and a
//! failed chart are recorded as warnings and the run finishes as partial.

use crate::acquire::{decode, parse_records, Fetcher, SourceLocation};
use crate::aggregate::aggregate;
use crate::classify::{classify, rankings};
use crate::exit_codes::ExitCode;
use crate::log_event;
use crate::logging::{event_names, LogContext, Stage};
use cs_common::{Dataset, Error, OutlierClassification, OutputFormat, Rankings, Result};
use cs_config::{Config, SourceConfig};
use cs_math::StatisticsSummary;
use cs_report::chart::write_chart;
use cs_report::{ReportData, ReportGenerator, ReportInputs, ReportWarning, RunMetadata};
use std::path::PathBuf;

/// Aggregated dataset plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub origin: String,
    pub sha256: String,
    pub bytes: u64,
    /// Encoding actually used to decode the source.
    pub encoding: String,
    /// Number of source rows before aggregation.
    pub records: usize,
}

/// Statistics, outliers and rankings over one dataset.
#[derive(Debug)]
pub struct Analysis {
    pub summary: StatisticsSummary,
    /// `None` when the median is zero.
    pub distance_pct: Option<f64>,
    pub classification: OutlierClassification,
    pub rankings: Rankings,
    /// Non-fatal errors hit while computing.
    pub degraded: Vec<Error>,
}

/// What happened to the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartStatus {
    Written(PathBuf),
    Disabled,
    Failed(String),
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Rendered report for stdout.
    pub output: String,
    pub report: ReportData,
    pub chart: ChartStatus,
    pub exit_code: ExitCode,
}

/// Fetch, decode, parse and aggregate the configured source.
pub fn load_dataset(source: &SourceConfig, ctx: &LogContext) -> Result<LoadedDataset> {
    let location = SourceLocation::parse(&source.url);
    log_event!(
        ctx,
        INFO,
        event_names::ACQUIRE_STARTED,
        Stage::Acquire,
        "Fetching source",
        origin = location.origin().as_str()
    );

    let resource = Fetcher::from_config(source)
        .fetch(&location)
        .map_err(Error::from)
        .inspect_err(|e| log_failure(ctx, Stage::Acquire, e))?;

    let decoded =
        decode(&resource.bytes, &source.encoding).inspect_err(|e| log_failure(ctx, Stage::Acquire, e))?;
    if decoded.lossy {
        log_event!(
            ctx,
            WARN,
            event_names::ACQUIRE_DECODE_LOSSY,
            Stage::Acquire,
            "Source contained bytes invalid for the encoding; replaced with U+FFFD",
            encoding = decoded.encoding
        );
    }
    log_event!(
        ctx,
        INFO,
        event_names::ACQUIRE_FINISHED,
        Stage::Acquire,
        "Source acquired",
        bytes = resource.len(),
        encoding = decoded.encoding
    );

    let delimiter = source.delimiter_byte().ok_or_else(|| {
        Error::InvalidConfig(format!(
            "delimiter must be a single ASCII character, got {:?}",
            source.delimiter
        ))
    })?;
    let records =
        parse_records(&decoded.text, delimiter).inspect_err(|e| log_failure(ctx, Stage::Parse, e))?;
    let record_count = records.len();
    log_event!(
        ctx,
        DEBUG,
        event_names::PARSE_FINISHED,
        Stage::Parse,
        "Rows parsed",
        records = record_count
    );

    let dataset = aggregate(records).inspect_err(|e| log_failure(ctx, Stage::Aggregate, e))?;
    log_event!(
        ctx,
        INFO,
        event_names::AGGREGATE_FINISHED,
        Stage::Aggregate,
        "Values summed per precinct",
        records = record_count,
        precincts = dataset.len()
    );

    Ok(LoadedDataset {
        dataset,
        bytes: resource.len(),
        origin: resource.origin,
        sha256: resource.sha256,
        encoding: decoded.encoding.to_string(),
        records: record_count,
    })
}

/// Compute the summary, classify outliers and build rankings.
pub fn analyze(dataset: &Dataset, top_n: usize, ctx: &LogContext) -> Result<Analysis> {
    let summary = StatisticsSummary::compute(&dataset.values())
        .map_err(Error::from)
        .inspect_err(|e| log_failure(ctx, Stage::Compute, e))?;

    let mut degraded = Vec::new();
    let distance_pct = match summary.distance_pct() {
        Ok(pct) => Some(pct),
        Err(e) => {
            let err = Error::from(e);
            log_event!(
                ctx,
                WARN,
                event_names::COMPUTE_DEGRADED,
                Stage::Compute,
                err.to_string(),
                field = "distance_pct",
                code = err.code()
            );
            degraded.push(err);
            None
        }
    };
    log_event!(
        ctx,
        INFO,
        event_names::COMPUTE_FINISHED,
        Stage::Compute,
        "Descriptive statistics computed",
        mean = summary.mean,
        median = summary.median,
        q1 = summary.q1,
        q3 = summary.q3
    );

    let classification = classify(dataset, &summary.fences);
    let rankings = rankings(dataset, &classification, top_n);
    log_event!(
        ctx,
        INFO,
        event_names::CLASSIFY_FINISHED,
        Stage::Classify,
        "Outliers classified",
        below = classification.below.len(),
        above = classification.above.len()
    );

    Ok(Analysis {
        summary,
        distance_pct,
        classification,
        rankings,
        degraded,
    })
}

/// Run the full pipeline with a resolved config.
pub fn run(
    config: &Config,
    config_hash: Option<String>,
    format: OutputFormat,
    ctx: &LogContext,
) -> Result<RunOutcome> {
    log_event!(
        ctx,
        INFO,
        event_names::RUN_STARTED,
        Stage::Init,
        "Starting run",
        format = tracing::field::display(format)
    );

    let loaded = load_dataset(&config.source, ctx)?;
    let analysis = analyze(&loaded.dataset, config.report.top_n, ctx)?;

    let generator = ReportGenerator::new(config.report.clone());
    let mut report = generator.build(ReportInputs {
        metadata: RunMetadata {
            run_id: ctx.run_id.clone(),
            source: loaded.origin,
            source_sha256: loaded.sha256,
            source_bytes: loaded.bytes,
            encoding: loaded.encoding,
            records: loaded.records,
            precincts: loaded.dataset.len(),
            config_hash,
        },
        dataset: loaded.dataset,
        summary: analysis.summary,
        distance_pct: analysis.distance_pct,
        classification: analysis.classification,
        rankings: analysis.rankings,
    });
    report.warnings = analysis
        .degraded
        .iter()
        .map(|err| warning(Stage::Compute, err))
        .collect();

    let chart = render_chart(&mut report, ctx);

    let output = generator
        .render(&report, format)
        .map_err(Error::from)
        .inspect_err(|e| log_failure(ctx, Stage::Report, e))?;
    log_event!(
        ctx,
        DEBUG,
        event_names::REPORT_RENDERED,
        Stage::Report,
        "Report rendered",
        bytes = output.len()
    );

    let exit_code = if report.warnings.is_empty() && report.degraded_fields().is_empty() {
        ExitCode::Clean
    } else {
        ExitCode::Partial
    };
    log_event!(
        ctx,
        INFO,
        event_names::RUN_FINISHED,
        Stage::Report,
        "Run finished",
        exit_code = exit_code.as_i32(),
        warnings = report.warnings.len()
    );

    Ok(RunOutcome {
        output,
        report,
        chart,
        exit_code,
    })
}

/// Write the chart; a failure is recorded on the report instead of aborting.
fn render_chart(report: &mut ReportData, ctx: &LogContext) -> ChartStatus {
    let chart_config = report.config.chart.clone();
    if !chart_config.enabled {
        log_event!(
            ctx,
            DEBUG,
            event_names::CHART_SKIPPED,
            Stage::Render,
            "Chart disabled"
        );
        return ChartStatus::Disabled;
    }

    match write_chart(report, &chart_config) {
        Ok(()) => {
            log_event!(
                ctx,
                INFO,
                event_names::CHART_WRITTEN,
                Stage::Render,
                "Chart written",
                path = tracing::field::display(chart_config.path.display())
            );
            ChartStatus::Written(chart_config.path)
        }
        Err(e) => {
            let err = Error::from(e);
            log_event!(
                ctx,
                WARN,
                event_names::CHART_FAILED,
                Stage::Render,
                err.to_string(),
                code = err.code()
            );
            report.warnings.push(warning(Stage::Render, &err));
            ChartStatus::Failed(err.to_string())
        }
    }
}

fn warning(stage: Stage, err: &Error) -> ReportWarning {
    ReportWarning {
        code: err.code(),
        stage: stage.to_string(),
        message: err.to_string(),
    }
}

fn log_failure(ctx: &LogContext, stage: Stage, err: &Error) {
    log_event!(
        ctx,
        ERROR,
        event_names::RUN_FAILED,
        stage,
        err.to_string(),
        code = err.code(),
        category = tracing::field::display(err.category())
    );
}
