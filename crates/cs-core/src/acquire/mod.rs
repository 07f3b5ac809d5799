//! Source acquisition: fetch, decode, parse.

pub mod decode;
pub mod fetch;
pub mod records;

pub use decode::{decode, lookup_encoding, DecodedText};
pub use fetch::{AcquireError, AcquiredResource, Fetcher, SourceLocation};
pub use records::{parse_records, RawRecord};
