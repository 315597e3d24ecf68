//! Fuzz harness for candidate lists and override maps.
//!
//! The `null` sentinel shares candidate lists with plain values; both
//! decodings must stay panic-free on malformed input.
//! Target: `shakedown_schema` candidate/override deserialization

#![no_main]

use libfuzzer_sys::fuzz_target;
use shakedown_schema::{Candidate, OverrideMap};

fuzz_target!(|data: &[u8]| {
    let input = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    let _: Result<Vec<Candidate>, _> = serde_yaml::from_str(input);
    let _: Result<OverrideMap, _> = serde_yaml::from_str(input);
});
