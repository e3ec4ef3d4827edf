// SPDX-License-Identifier: MIT OR Apache-2.0
//! Subcommand implementations for the `oxc` CLI.

use crate::format::{OutputFormat, format_message};
use anyhow::{Context, Result};
use oxc_config::{CodecConfig, load_config, validate_config};
use oxc_json::stream::JsonStream;
use oxc_json::{JsonFormatter, UnrecognizedMessageType};
use oxc_core::VehicleMessage;
use serde_json::json;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Per-run record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Records that decoded.
    pub ok: usize,
    /// Records that were rejected.
    pub failed: usize,
}

impl Summary {
    fn record<T>(&mut self, result: &Result<T, UnrecognizedMessageType>) {
        match result {
            Ok(_) => self.ok += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Read the whole input; `-` means stdin.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("read stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))
}

/// Print the variant of every record without building messages.
///
/// Records are split by `stream`, so its length limit applies here too.
pub fn classify(
    input: &[u8],
    mut stream: JsonStream,
    json_output: bool,
    out: &mut impl Write,
) -> Result<Summary> {
    let formatter = stream.formatter();
    let mut records = stream.push_records(input);
    records.extend(stream.finish_records());

    let mut summary = Summary::default();
    for (index, record) in records.into_iter().enumerate() {
        let result = record.and_then(|text| formatter.classify(&text));
        summary.record(&result);

        let line = match (&result, json_output) {
            (Ok(variant), false) => variant.label().to_string(),
            (Err(e), false) => format!("error: {e}"),
            (Ok(variant), true) => json!({ "record": index, "variant": variant }).to_string(),
            (Err(e), true) => json!({ "record": index, "error": e.to_string() }).to_string(),
        };
        writeln!(out, "{line}")?;
    }

    debug!(target: "oxc", ok = summary.ok, failed = summary.failed, "classified");
    Ok(summary)
}

fn decode_all(input: &[u8], mut stream: JsonStream) -> Vec<Result<VehicleMessage, UnrecognizedMessageType>> {
    let mut results = stream.push(input);
    results.extend(stream.finish());
    results
}

/// Describe every record of `input`, one line each.
pub fn decode(
    input: &[u8],
    stream: JsonStream,
    format: OutputFormat,
    formatter: &JsonFormatter,
    out: &mut impl Write,
) -> Result<Summary> {
    let mut summary = Summary::default();
    for result in decode_all(input, stream) {
        summary.record(&result);
        let line = match (&result, format) {
            (Ok(msg), _) => format_message(msg, format, formatter),
            (Err(e), OutputFormat::Text) => format!("error: {e}"),
            (Err(e), OutputFormat::Json) => json!({ "error": e.to_string() }).to_string(),
        };
        writeln!(out, "{line}")?;
    }
    debug!(target: "oxc", ok = summary.ok, failed = summary.failed, "decoded");
    Ok(summary)
}

/// Decode every record of `input` and write it back in canonical form.
///
/// Rejected records are logged and left out of the output.
pub fn normalize(
    input: &[u8],
    stream: JsonStream,
    formatter: &JsonFormatter,
    out: &mut impl Write,
) -> Result<Summary> {
    let mut summary = Summary::default();
    for (index, result) in decode_all(input, stream).into_iter().enumerate() {
        summary.record(&result);
        match result {
            Ok(msg) => writeln!(out, "{}", formatter.serialize(&msg))?,
            Err(e) => warn!(target: "oxc", record = index, error = %e, "skipping record"),
        }
    }
    debug!(target: "oxc", ok = summary.ok, failed = summary.failed, "normalized");
    Ok(summary)
}

/// JSON schema of the configuration file.
pub fn schema_json() -> Result<String> {
    let schema = schemars::schema_for!(CodecConfig);
    serde_json::to_string_pretty(&schema).context("serialize config schema")
}

/// Load and validate a configuration file.
///
/// Returns a list of human-readable diagnostic messages (errors and warnings).
pub fn config_check(path: Option<&Path>) -> Result<Vec<String>> {
    let mut diagnostics = Vec::new();

    let config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            diagnostics.push(format!("error: {e}"));
            return Ok(diagnostics);
        }
    };

    match validate_config(&config) {
        Ok(warnings) => {
            diagnostics.extend(warnings.iter().map(|w| format!("warning: {w}")));
            diagnostics.push("config: ok".into());
        }
        Err(e) => diagnostics.push(format!("error: {e}")),
    }

    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &[u8] = b"{\"name\":\"speed\",\"value\":42}\n\
        {\"bus\":1,\"id\":2,\"payload\":\"0x0102\"}\0\
        [1,2]\n\
        \n\
        {\"command\":\"nope\"}";

    fn run<F>(f: F) -> (Summary, String)
    where
        F: FnOnce(&mut Vec<u8>) -> Result<Summary>,
    {
        let mut out = Vec::new();
        let summary = f(&mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn classify_reports_each_record() {
        let (summary, text) = run(|out| classify(INPUT, JsonStream::new(), false, out));
        assert_eq!(summary, Summary { ok: 3, failed: 1 });
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "SimpleVehicleMessage");
        assert_eq!(lines[1], "CanMessage");
        assert!(lines[2].starts_with("error: unrecognized message type"));
        assert_eq!(lines[3], "VehicleMessage");
    }

    #[test]
    fn classify_json_lines_carry_index() {
        let (_, text) = run(|out| classify(INPUT, JsonStream::new(), true, out));
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first, json!({ "record": 0, "variant": "simple_vehicle_message" }));
    }

    #[test]
    fn classify_applies_record_length_limit() {
        let input = b"{\"name\":\"a\"}\n{\"name\":\"speed\",\"value\":42}\n";
        let (summary, text) = run(|out| classify(input, JsonStream::with_max_record_len(16), false, out));
        assert_eq!(summary, Summary { ok: 1, failed: 1 });
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "NamedVehicleMessage");
        assert!(lines[1].contains("exceeds"), "{}", lines[1]);
    }

    #[test]
    fn decode_consumes_unterminated_tail() {
        let (summary, text) = run(|out| {
            decode(INPUT, JsonStream::new(), OutputFormat::Text, &JsonFormatter::new(), out)
        });
        assert_eq!(summary, Summary { ok: 3, failed: 1 });
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("CanMessage bus=1 id=0x2 payload=0102"));
    }

    #[test]
    fn normalize_drops_failed_records() {
        let formatter = JsonFormatter::new();
        let (summary, text) = run(|out| normalize(INPUT, JsonStream::new(), &formatter, out));
        assert_eq!(summary.failed, 1);
        assert_eq!(
            text,
            "{\"name\":\"speed\",\"value\":42.0}\n\
             {\"id\":2,\"bus\":1,\"payload\":[1,2]}\n\
             {\"command\":\"nope\"}\n"
        );
    }

    #[test]
    fn schema_mentions_every_key() {
        let schema = schema_json().unwrap();
        for key in ["payload_encoding", "pretty", "log_level", "max_record_len"] {
            assert!(schema.contains(key), "{key}");
        }
    }

    #[test]
    fn config_check_missing_file() {
        let diags = config_check(Some(Path::new("/nonexistent/oxc.toml"))).unwrap();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].starts_with("error: config file not found"));
    }
}
