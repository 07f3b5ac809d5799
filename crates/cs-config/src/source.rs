//! Input source settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ISP-RJ monthly evolution per police precinct.
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.ispdados.rj.gov.br/Arquivos/BaseDPEvolucaoMensalCisp.csv";

/// Where the CSV comes from and how to decode it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SourceConfig {
    /// `http(s)://` URL, `file://` URL or plain filesystem path.
    #[serde(default = "default_url")]
    pub url: String,

    /// WHATWG encoding label.
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Single-byte field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest payload accepted, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_encoding() -> String {
    "iso-8859-1".to_string()
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_bytes() -> u64 {
    64 * 1024 * 1024
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            encoding: default_encoding(),
            delimiter: default_delimiter(),
            timeout_secs: default_timeout_secs(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl SourceConfig {
    /// The delimiter as a byte, if it is exactly one ASCII character.
    pub fn delimiter_byte(&self) -> Option<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Some(*b),
            _ => None,
        }
    }
}
