//! Report generator implementation.

use crate::config::ReportConfig;
use crate::error::Result;
use crate::sections::*;

use chrono::{DateTime, Utc};
use cs_common::{Dataset, OutlierClassification, OutputFormat, Rankings};
use cs_math::StatisticsSummary;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything the pipeline hands over for one report.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub metadata: RunMetadata,
    pub dataset: Dataset,
    pub summary: StatisticsSummary,
    /// Already resolved; `None` when the median is zero.
    pub distance_pct: Option<f64>,
    pub classification: OutlierClassification,
    pub rankings: Rankings,
}

/// A non-fatal problem recorded during the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// Stable error code.
    pub code: u32,
    /// Pipeline stage that raised it.
    pub stage: String,
    pub message: String,
}

/// Complete report data structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    /// Report configuration.
    pub config: ReportConfig,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    pub metadata: RunMetadata,
    pub central: CentralTendencySection,
    pub dispersion: DispersionSection,
    pub position: PositionSection,
    pub outliers: OutliersSection,
    pub rankings: RankingsSection,
    pub shape: ShapeSection,
    /// Aggregated per-precinct values in dataset order.
    pub dataset: Dataset,
    /// Degraded measures and chart failures; omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ReportWarning>,
}

impl ReportData {
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Names of measures that could not be computed.
    pub fn degraded_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.central.distance_pct.is_none() {
            fields.push("distance_pct");
        }
        if self.shape.skewness.is_none() {
            fields.push("skewness");
        }
        if self.shape.kurtosis.is_none() {
            fields.push("kurtosis");
        }
        fields
    }
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Assemble report sections from computed results.
    pub fn build(&self, inputs: ReportInputs) -> ReportData {
        debug!(
            precincts = inputs.dataset.len(),
            outliers = inputs.classification.outlier_count(),
            "Building report data"
        );

        ReportData {
            config: self.config.clone(),
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            central: CentralTendencySection::new(&inputs.summary, inputs.distance_pct),
            dispersion: DispersionSection::from_summary(&inputs.summary),
            position: PositionSection::from_summary(&inputs.summary),
            outliers: OutliersSection::from_classification(&inputs.classification),
            rankings: RankingsSection::from_rankings(&inputs.rankings),
            shape: ShapeSection::from_summary(&inputs.summary),
            metadata: inputs.metadata,
            dataset: inputs.dataset,
            warnings: Vec::new(),
        }
    }

    /// Render report data in the requested format.
    pub fn render(&self, data: &ReportData, format: OutputFormat) -> Result<String> {
        let output = match format {
            OutputFormat::Text => self.render_text(data),
            OutputFormat::Json => serde_json::to_string_pretty(data)?,
            OutputFormat::Summary => self.render_summary(data),
        };

        info!(
            bytes = output.len(),
            format = %format,
            "Report generated"
        );

        Ok(output)
    }

    fn render_text(&self, data: &ReportData) -> String {
        let mut out = String::new();
        out.push_str(data.title());
        out.push('\n');
        data.metadata.write_text(&mut out);
        data.central.write_text(&mut out);
        data.dispersion.write_text(&mut out);
        data.position.write_text(&mut out);
        data.outliers.write_text(&mut out);
        data.rankings.write_text(&mut out);
        data.shape.write_text(&mut out);
        out
    }

    fn render_summary(&self, data: &ReportData) -> String {
        format!(
            "{} precincts | mean {:.2} | median {:.2} | distance {} | q1 {} | q3 {} | fences [{}, {}] | outliers {} below, {} above | skew {} | kurt {}\n",
            data.dataset.len(),
            data.central.mean,
            data.central.median,
            data.central.distance_formatted(),
            data.position.q1,
            data.position.q3,
            data.position.lower_fence,
            data.position.upper_fence,
            data.outliers.lower.len(),
            data.outliers.upper.len(),
            fmt_opt2(data.shape.skewness),
            fmt_opt2(data.shape.kurtosis),
        )
    }
}
