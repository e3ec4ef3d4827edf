// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz config parsing: any TOML that parses must validate without panicking,
//! and the stream it builds must carry its record limit and formatter.
#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = oxc_config::parse_toml(text) else {
        return;
    };
    let _ = oxc_config::validate_config(&config);
    let stream = config.stream();
    assert_eq!(stream.max_record_len(), config.max_record_len());
    assert_eq!(stream.formatter(), config.formatter());
});
