//! Configuration snapshots for report metadata and reproducibility.
//!
//! A snapshot captures which config file a run used and a digest of its
//! exact bytes, so two reports can be checked for identical settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::resolve::{ConfigPaths, ConfigSource};

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// Path the config was loaded from.
    #[serde(default)]
    pub path: Option<String>,

    /// Source of the configuration.
    pub source: String,

    /// SHA-256 of the config file content, or of `"none"` for defaults.
    pub hash: String,
}

impl ConfigSnapshot {
    /// Snapshot a config loaded from `paths` with raw `content`.
    pub fn new(paths: &ConfigPaths, content: &str) -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            path: paths.config.as_ref().map(|p| p.display().to_string()),
            source: paths.source.to_string(),
            hash: hash_content(content),
        }
    }

    /// Create a snapshot with only defaults (no config file loaded).
    pub fn defaults_only() -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            path: None,
            source: ConfigSource::BuiltinDefault.to_string(),
            hash: hash_content("none"),
        }
    }

    /// Whether a config file (rather than built-in defaults) was used.
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }

    /// Check if this snapshot matches another (same config).
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.hash == other.hash
    }

    /// Get a short identifier for this snapshot (first 12 chars of hash).
    pub fn short_id(&self) -> &str {
        &self.hash[..12.min(self.hash.len())]
    }
}

/// Hash content with SHA-256 and return hex string.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
