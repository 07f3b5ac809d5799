//! Fetch the raw source bytes from HTTP(S) or the local filesystem.

use cs_config::SourceConfig;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Where the source resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// `http://` or `https://` URL.
    Http(String),
    /// Local file, given as a path or a `file://` URL.
    File(PathBuf),
}

impl SourceLocation {
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Http(trimmed.to_string())
        } else if let Some(path) = trimmed.strip_prefix("file://") {
            SourceLocation::File(PathBuf::from(path))
        } else {
            SourceLocation::File(PathBuf::from(trimmed))
        }
    }

    /// Display form used in errors and report metadata.
    pub fn origin(&self) -> String {
        match self {
            SourceLocation::Http(url) => url.clone(),
            SourceLocation::File(path) => path.display().to_string(),
        }
    }
}

/// Errors raised while fetching the source.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("failed to fetch {origin}: {reason}")]
    Transport { origin: String, reason: String },

    #[error("{origin} answered with HTTP status {status}")]
    Status { origin: String, status: u16 },

    #[error("{origin} exceeds the {limit} byte download limit")]
    TooLarge { origin: String, limit: u64 },

    #[error("failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<AcquireError> for cs_common::Error {
    fn from(err: AcquireError) -> Self {
        match err {
            AcquireError::Transport { origin, reason } => cs_common::Error::Fetch { origin, reason },
            AcquireError::Status { origin, status } => {
                cs_common::Error::HttpStatus { origin, status }
            }
            AcquireError::TooLarge { origin, limit } => {
                cs_common::Error::PayloadTooLarge { origin, limit }
            }
            AcquireError::File { path, source } => cs_common::Error::Fetch {
                origin: path.display().to_string(),
                reason: source.to_string(),
            },
        }
    }
}

/// Raw bytes of the source plus provenance.
#[derive(Debug, Clone)]
pub struct AcquiredResource {
    pub origin: String,
    pub bytes: Vec<u8>,
    /// Hex SHA-256 of `bytes`.
    pub sha256: String,
}

impl AcquiredResource {
    pub fn new(origin: impl Into<String>, bytes: Vec<u8>) -> Self {
        let sha256 = hex::encode(Sha256::digest(&bytes));
        AcquiredResource {
            origin: origin.into(),
            bytes,
            sha256,
        }
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Blocking fetcher with a timeout and a size cap.
#[derive(Debug, Clone)]
pub struct Fetcher {
    timeout: Duration,
    max_bytes: u64,
}

impl Fetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> Self {
        Fetcher { timeout, max_bytes }
    }

    pub fn from_config(source: &SourceConfig) -> Self {
        Self::new(Duration::from_secs(source.timeout_secs), source.max_bytes)
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Fetch the resource at `location`.
    pub fn fetch(&self, location: &SourceLocation) -> Result<AcquiredResource, AcquireError> {
        let origin = location.origin();
        let bytes = match location {
            SourceLocation::Http(url) => self.fetch_http(url)?,
            SourceLocation::File(path) => {
                let file = std::fs::File::open(path).map_err(|source| AcquireError::File {
                    path: path.clone(),
                    source,
                })?;
                read_limited(file, self.max_bytes, &origin)?
            }
        };
        debug!(origin = %origin, bytes = bytes.len(), "Source fetched");
        Ok(AcquiredResource::new(origin, bytes))
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>, AcquireError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        match agent.get(url).call() {
            Ok(response) => read_limited(response.into_reader(), self.max_bytes, url),
            Err(ureq::Error::Status(status, _)) => Err(AcquireError::Status {
                origin: url.to_string(),
                status,
            }),
            Err(ureq::Error::Transport(transport)) => Err(AcquireError::Transport {
                origin: url.to_string(),
                reason: transport.to_string(),
            }),
        }
    }
}

/// Read at most `limit` bytes; one byte more means the source is too large.
fn read_limited<R: Read>(reader: R, limit: u64, origin: &str) -> Result<Vec<u8>, AcquireError> {
    let mut bytes = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| AcquireError::Transport {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
    if bytes.len() as u64 > limit {
        return Err(AcquireError::TooLarge {
            origin: origin.to_string(),
            limit,
        });
    }
    Ok(bytes)
}
