//! Fuzz target for config.json parsing and validation.
//!
//! Tests that parsing and semantic validation handle arbitrary input
//! without panicking.

#![no_main]

use cs_config::{validate_config, Config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<Config>(data) {
        let _ = validate_config(&config);
    }
});
