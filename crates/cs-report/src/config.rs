//! Report configuration types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Chart output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartConfig {
    /// Render the chart at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// SVG output path.
    #[serde(default = "default_chart_path")]
    pub path: PathBuf,
    /// Canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Histogram bin count.
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_true() -> bool {
    true
}

fn default_chart_path() -> PathBuf {
    PathBuf::from("recuperacao_veiculos.svg")
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    700
}

fn default_bins() -> usize {
    50
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_chart_path(),
            width: default_width(),
            height: default_height(),
            bins: default_bins(),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Report and chart title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Length of the top/bottom rankings.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Chart settings.
    #[serde(default)]
    pub chart: ChartConfig,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_title() -> String {
    "Análise de recuperação de veículos no RJ".to_string()
}

fn default_top_n() -> usize {
    5
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: default_title(),
            top_n: default_top_n(),
            chart: ChartConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the ranking length.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Set the chart output path.
    pub fn with_chart_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chart.path = path.into();
        self
    }

    /// Enable or disable chart output.
    pub fn with_chart(mut self, enabled: bool) -> Self {
        self.chart.enabled = enabled;
        self
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
