// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz message decoding with arbitrary bytes.
//!
//! Decoding must never panic. Anything that decodes must re-encode to text
//! that decodes again to the same shape with the same extras, and
//! classification must agree with the decoded variant.
#![no_main]
use libfuzzer_sys::fuzz_target;
use oxc_json::{JsonFormatter, PayloadEncoding};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let classified = oxc_json::classify(text);
    let Ok(msg) = oxc_json::deserialize(text) else {
        return;
    };
    assert_eq!(classified.ok(), Some(msg.variant()));

    for &encoding in PayloadEncoding::all() {
        let formatter = JsonFormatter::new().with_payload_encoding(encoding);
        let again = formatter
            .deserialize(&formatter.serialize(&msg))
            .expect("re-encoded message must decode");
        assert_eq!(again.variant(), msg.variant());
        assert_eq!(again.kind, msg.kind);
        assert_eq!(again.extras, msg.extras);
        assert_eq!(again.timestamp.is_some(), msg.timestamp.is_some());
    }
});
