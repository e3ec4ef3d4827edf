// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz the stream splitter: chunk boundaries must not change the number of
//! records produced, and the buffer must be empty after `finish`.
#![no_main]
use libfuzzer_sys::fuzz_target;
use oxc_json::stream::JsonStream;

fuzz_target!(|data: &[u8]| {
    let Some((&split, body)) = data.split_first() else {
        return;
    };

    let mut whole = JsonStream::with_max_record_len(1024);
    let mut expected = whole.push(body).len();
    expected += whole.finish().len();
    assert!(whole.is_empty());

    let mut chunked = JsonStream::with_max_record_len(1024);
    let mut got = 0;
    for piece in body.chunks(usize::from(split).max(1)) {
        got += chunked.push(piece).len();
    }
    got += chunked.finish().len();
    assert!(chunked.is_empty());
    assert_eq!(got, expected);
});
