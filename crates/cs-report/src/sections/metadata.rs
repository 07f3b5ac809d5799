//! Run provenance printed at the top of the report.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Where the data came from and how much of it there was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Correlates the report with structured log lines.
    pub run_id: String,
    /// URL or path the payload was read from.
    pub source: String,
    /// Hex SHA-256 of the raw payload.
    pub source_sha256: String,
    pub source_bytes: u64,
    /// Encoding label used to decode the payload.
    pub encoding: String,
    /// CSV rows parsed before aggregation.
    pub records: usize,
    /// Distinct precincts after aggregation.
    pub precincts: usize,
    /// Hash of the loaded config file, if one was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
}

impl RunMetadata {
    /// First 12 hex chars of the payload digest.
    pub fn short_digest(&self) -> &str {
        &self.source_sha256[..12.min(self.source_sha256.len())]
    }

    pub fn write_text(&self, out: &mut String) {
        let _ = writeln!(out, "Fonte: {}", self.source);
        let _ = writeln!(
            out,
            "Registros: {} em {} delegacias ({} bytes, {}, sha256 {})",
            self.records,
            self.precincts,
            self.source_bytes,
            self.encoding,
            self.short_digest()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> RunMetadata {
        RunMetadata {
            run_id: "run-1".into(),
            source: "dados.csv".into(),
            source_sha256: "0123456789abcdef0123".into(),
            source_bytes: 2048,
            encoding: "windows-1252".into(),
            records: 300,
            precincts: 3,
            config_hash: None,
        }
    }

    #[test]
    fn short_digest_truncates() {
        assert_eq!(metadata().short_digest(), "0123456789ab");
    }

    #[test]
    fn text_mentions_counts() {
        let mut out = String::new();
        metadata().write_text(&mut out);
        assert!(out.contains("Fonte: dados.csv"));
        assert!(out.contains("300 em 3 delegacias"));
    }

    #[test]
    fn config_hash_omitted_when_absent() {
        let json = serde_json::to_value(metadata()).unwrap();
        assert!(json.get("config_hash").is_none());
    }
}
