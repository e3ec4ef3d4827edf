// SPDX-License-Identifier: MIT OR Apache-2.0
//! Incremental splitter for delimited message streams.
//!
//! Vehicle interfaces emit one JSON object per record, terminated by a
//! newline or a NUL byte. [`JsonStream`] buffers incoming bytes and yields a
//! decoded message for every complete record, so records may be split
//! across reads.
//!
//! # Examples
//!
//! ```
//! use oxc_json::stream::JsonStream;
//!
//! let mut stream = JsonStream::new();
//! assert!(stream.push(br#"{"name": "speed", "#).is_empty());
//! let out = stream.push(b"\"value\": 42}\0");
//! assert_eq!(out.len(), 1);
//! assert!(out[0].is_ok());
//! ```

use crate::error::Reason;
use crate::{JsonFormatter, UnrecognizedMessageType};
use oxc_core::VehicleMessage;
use tracing::{trace, warn};

/// Default maximum record length (64 KiB).
pub const DEFAULT_MAX_RECORD_LEN: usize = 64 * 1024;

fn is_delimiter(b: u8) -> bool {
    b == b'\n' || b == b'\0'
}

/// Buffered record splitter and decoder.
///
/// A record that grows past the length limit is rejected as soon as the
/// buffer overflows, without waiting for its delimiter; the rest of it is
/// discarded up to the next delimiter.
#[derive(Debug, Clone)]
pub struct JsonStream {
    buf: Vec<u8>,
    max_record_len: usize,
    formatter: JsonFormatter,
    discarding: bool,
}

impl Default for JsonStream {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonStream {
    /// Create a stream with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_record_len(DEFAULT_MAX_RECORD_LEN)
    }

    /// Create a stream with a custom record size limit.
    #[must_use]
    pub fn with_max_record_len(max_record_len: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_record_len,
            formatter: JsonFormatter::new(),
            discarding: false,
        }
    }

    /// Use `formatter` to decode records.
    #[must_use]
    pub fn with_formatter(mut self, formatter: JsonFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// The formatter records are decoded with.
    #[must_use]
    pub fn formatter(&self) -> JsonFormatter {
        self.formatter
    }

    /// Longest record accepted, in bytes.
    #[must_use]
    pub fn max_record_len(&self) -> usize {
        self.max_record_len
    }

    /// Feed a chunk of bytes.
    ///
    /// Returns one result per complete record now in the buffer. Blank records
    /// are skipped; a trailing partial record stays buffered.
    pub fn push(&mut self, data: &[u8]) -> Vec<Result<VehicleMessage, UnrecognizedMessageType>> {
        let records = self.push_records(data);
        self.decode(records)
    }

    /// Treat whatever is buffered as a final, unterminated record.
    ///
    /// The stream is empty afterwards.
    pub fn finish(&mut self) -> Vec<Result<VehicleMessage, UnrecognizedMessageType>> {
        let records = self.finish_records();
        self.decode(records)
    }

    /// Like [`push`](Self::push), but yields the trimmed text of each record
    /// instead of decoding it.
    pub fn push_records(&mut self, data: &[u8]) -> Vec<Result<String, UnrecognizedMessageType>> {
        let mut data = data;
        if self.discarding {
            match data.iter().position(|&b| is_delimiter(b)) {
                Some(pos) => {
                    data = &data[pos + 1..];
                    self.discarding = false;
                }
                None => return Vec::new(),
            }
        }

        self.buf.extend_from_slice(data);
        let mut records = self.drain_records();

        if self.buf.len() > self.max_record_len {
            records.push(Err(self.too_long(self.buf.len())));
            self.buf.clear();
            self.discarding = true;
        }
        records
    }

    /// Like [`finish`](Self::finish), but yields record text.
    pub fn finish_records(&mut self) -> Vec<Result<String, UnrecognizedMessageType>> {
        self.discarding = false;
        if !self.buf.is_empty() && !self.buf.ends_with(b"\n") && !self.buf.ends_with(b"\0") {
            self.buf.push(b'\n');
        }
        self.drain_records()
    }

    /// `true` when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of buffered bytes not yet consumed.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }

    /// Discard buffered data.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.discarding = false;
    }

    fn decode(
        &self,
        records: Vec<Result<String, UnrecognizedMessageType>>,
    ) -> Vec<Result<VehicleMessage, UnrecognizedMessageType>> {
        records
            .into_iter()
            .map(|record| record.and_then(|text| self.formatter.deserialize(&text)))
            .collect()
    }

    fn too_long(&self, len: usize) -> UnrecognizedMessageType {
        warn!(target: "oxc.stream", len, max = self.max_record_len, "record too long; discarded");
        Reason::RecordTooLong {
            len,
            max: self.max_record_len,
        }
        .into()
    }

    fn drain_records(&mut self) -> Vec<Result<String, UnrecognizedMessageType>> {
        let mut results = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| is_delimiter(b)) {
            let record: Vec<u8> = self.buf.drain(..=pos).collect();
            let record = &record[..record.len() - 1];

            if record.len() > self.max_record_len {
                results.push(Err(self.too_long(record.len())));
                continue;
            }

            let text = match std::str::from_utf8(record) {
                Ok(s) => s.trim(),
                Err(e) => {
                    results.push(Err(Reason::InvalidUtf8(e).into()));
                    continue;
                }
            };
            if text.is_empty() {
                continue;
            }

            trace!(target: "oxc.stream", len = text.len(), "record");
            results.push(Ok(text.to_owned()));
        }
        results
    }
}
