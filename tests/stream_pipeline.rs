// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cross-crate pipeline tests: configuration builds the formatter and the
//! stream splitter, which decode traces delivered in arbitrary chunks.

use oxc_config::{CodecConfig, load_config, parse_toml, validate_config};
use oxc_core::{
    CanMessage, Command, CommandResponse, DiagnosticRequest, DiagnosticResponse,
    EventedSimpleVehicleMessage, NamedVehicleMessage, SimpleVehicleMessage, Variant,
    VehicleMessage,
};
use oxc_json::stream::JsonStream;
use oxc_json::{JsonFormatter, PayloadEncoding, Reason};
use proptest::prelude::*;
use serial_test::serial;

fn trace() -> Vec<VehicleMessage> {
    vec![
        VehicleMessage::from(CanMessage::new(1, 0x7df, vec![0x02, 0x01, 0x0c])).with_timestamp(1_000),
        VehicleMessage::from(DiagnosticRequest::new(1, 0x7df, 1, 0x0c).with_frequency(1.0)),
        VehicleMessage::from(
            DiagnosticResponse::new(1, 0x7e8, 1, 0x0c, true)
                .with_payload(vec![0x1a, 0xf8])
                .with_value(1726.0),
        )
        .with_timestamp(1_250),
        VehicleMessage::from(Command::new("version")),
        VehicleMessage::from(CommandResponse::new("version").with_message("v7.0.1")),
        VehicleMessage::from(SimpleVehicleMessage::new("vehicle_speed", 42.5)).with_timestamp(2_000),
        VehicleMessage::from(EventedSimpleVehicleMessage::new("door_status", "driver", true)),
        VehicleMessage::from(NamedVehicleMessage::new("ignition")).with_extra("source", "usb"),
        VehicleMessage::generic().with_extra("heartbeat", 1),
    ]
}

fn decode_chunked(stream: &mut JsonStream, bytes: &[u8], chunk: usize) -> Vec<VehicleMessage> {
    let mut out = Vec::new();
    for piece in bytes.chunks(chunk.max(1)) {
        out.extend(stream.push(piece).into_iter().map(Result::unwrap));
    }
    out.extend(stream.finish().into_iter().map(Result::unwrap));
    out
}

// ── Config drives the codec ─────────────────────────────────────────────

#[test]
fn hex_config_round_trips_trace() {
    let cfg = parse_toml("payload_encoding = \"hex\"\nmax_record_len = 4096\n").unwrap();
    validate_config(&cfg).unwrap();
    let formatter = cfg.formatter();
    let batch = formatter.serialize_batch(&trace());
    assert!(batch.contains("\"payload\":\"0x02010c\""));

    let mut stream = cfg.stream();
    assert_eq!(decode_chunked(&mut stream, batch.as_bytes(), 7), trace());
}

#[test]
fn nul_delimited_trace_decodes() {
    let formatter = JsonFormatter::new();
    let mut bytes = Vec::new();
    for msg in trace() {
        bytes.extend_from_slice(formatter.serialize(&msg).as_bytes());
        bytes.push(0);
    }
    let mut stream = CodecConfig::default().stream();
    let decoded = decode_chunked(&mut stream, &bytes, 1);
    let variants: Vec<Variant> = decoded.iter().map(VehicleMessage::variant).collect();
    assert_eq!(variants, Variant::all());
}

#[test]
fn config_record_limit_is_enforced() {
    let cfg = CodecConfig {
        max_record_len: Some(16),
        ..CodecConfig::default()
    };
    let mut stream = cfg.stream();
    let out = stream.push(b"{\"name\":\"ok\"}\n{\"name\":\"much too long for this\"}\n");
    assert_eq!(out.len(), 2);
    assert!(out[0].is_ok());
    assert!(matches!(
        out[1].as_ref().unwrap_err().reason(),
        Reason::RecordTooLong { max: 16, .. }
    ));
}

#[test]
fn bad_record_does_not_poison_stream() {
    let mut stream = JsonStream::new();
    let out = stream.push(b"{\"name\":\"a\"}\n{oops\n{\"name\":\"b\"}\n");
    assert_eq!(out.len(), 3);
    assert!(out[0].is_ok());
    assert!(out[1].as_ref().unwrap_err().is_syntax());
    assert!(out[2].is_ok());
}

#[test]
#[serial]
fn env_encoding_reaches_formatter() {
    // SAFETY: serialized with the other env test in this file.
    unsafe { std::env::set_var("OXC_PAYLOAD_ENCODING", "hex") };
    let cfg = load_config(None);
    // SAFETY: as above.
    unsafe { std::env::remove_var("OXC_PAYLOAD_ENCODING") };
    let formatter = cfg.unwrap().formatter();
    assert_eq!(formatter.payload_encoding(), PayloadEncoding::Hex);
}

#[test]
#[serial]
fn default_load_uses_array_payloads() {
    let formatter = load_config(None).unwrap().formatter();
    let text = formatter.serialize(&VehicleMessage::from(CanMessage::new(0, 1, vec![7])));
    assert_eq!(text, r#"{"id":1,"bus":0,"payload":[7]}"#);
}

// ── Chunk boundaries never change the result ────────────────────────────

proptest! {
    #[test]
    fn chunking_is_invisible(chunk in 1usize..64, hex in any::<bool>()) {
        let encoding = if hex { PayloadEncoding::Hex } else { PayloadEncoding::Array };
        let formatter = JsonFormatter::new().with_payload_encoding(encoding);
        let batch = formatter.serialize_batch(&trace());
        let mut stream = JsonStream::new().with_formatter(formatter);
        prop_assert_eq!(decode_chunked(&mut stream, batch.as_bytes(), chunk), trace());
        prop_assert!(stream.is_empty());
    }
}
