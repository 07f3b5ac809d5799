//! Character decoding of the raw source bytes.

use cs_common::{Error, Result};
use encoding_rs::Encoding;

/// Source text after decoding.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    /// Canonical name of the encoding actually used.
    pub encoding: &'static str,
    /// Whether malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

/// Look up a WHATWG encoding label such as `iso-8859-1` or `utf-8`.
pub fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Decode `bytes` with the encoding named by `label`.
///
/// A byte-order mark overrides the label.
pub fn decode(bytes: &[u8], label: &str) -> Result<DecodedText> {
    let encoding = lookup_encoding(label)?;
    let (text, used, lossy) = encoding.decode(bytes);
    Ok(DecodedText {
        text: text.into_owned(),
        encoding: used.name(),
        lossy,
    })
}
