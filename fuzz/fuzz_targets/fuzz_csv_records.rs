//! Fuzz target for source decoding, CSV record parsing and aggregation.
//!
//! Arbitrary bytes must produce either a dataset or a typed error, never a
//! panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use cs_core::acquire::{decode, parse_records};
use cs_core::aggregate::aggregate;

fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = decode(data, "iso-8859-1") else {
        return;
    };
    if let Ok(records) = parse_records(&decoded.text, b';') {
        let _ = aggregate(records);
    }
});
