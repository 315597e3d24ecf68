//! Fuzz harness for catalog files.
//!
//! Operators can hand the CLI arbitrary YAML or JSON catalogs; parsing must
//! reject malformed input without panicking.
//! Target: `shakedown_catalog::Catalog` deserialization

#![no_main]

use libfuzzer_sys::fuzz_target;
use shakedown_catalog::Catalog;

fuzz_target!(|data: &[u8]| {
    let input = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return, // Skip non-UTF-8 input
    };

    let _: Result<Catalog, _> = serde_yaml::from_str(input);
    let _: Result<Catalog, _> = serde_json::from_str(input);
});
