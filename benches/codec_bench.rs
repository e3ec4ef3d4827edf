// SPDX-License-Identifier: MIT OR Apache-2.0
//! Benchmarks for shape inference, decoding, encoding and stream splitting.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use oxc_core::{CanMessage, SimpleVehicleMessage, VehicleMessage};
use oxc_json::stream::JsonStream;
use oxc_json::{JsonFormatter, PayloadEncoding};

// ── Sample records ──────────────────────────────────────────────────────

const CASES: &[(&str, &str)] = &[
    ("can", r#"{"bus":1,"id":2015,"payload":[2,1,12,0,0,0,0,0],"timestamp":1332432977.835}"#),
    ("can_hex", r#"{"bus":1,"id":2015,"payload":"0x02010c0000000000"}"#),
    ("diag_request", r#"{"bus":1,"id":2015,"mode":1,"pid":12,"frequency":1.0}"#),
    ("diag_response", r#"{"bus":1,"id":2024,"mode":1,"pid":12,"success":true,"value":1726.0}"#),
    ("command", r#"{"command_name":"version"}"#),
    ("simple", r#"{"name":"vehicle_speed","value":42.5,"timestamp":1332432977.835}"#),
    ("evented", r#"{"name":"door_status","value":"driver","event":true}"#),
    ("generic", r#"{"heartbeat":1,"source":"usb"}"#),
];

fn trace(n: usize) -> Vec<VehicleMessage> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                VehicleMessage::from(SimpleVehicleMessage::new("engine_speed", i as f64))
                    .with_timestamp(i as u64 * 10)
            } else {
                VehicleMessage::from(CanMessage::new(1, 0x7e8, vec![0x41, 0x0c, i as u8, 0]))
            }
        })
        .collect()
}

// ── classify() vs deserialize() per shape ───────────────────────────────

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let formatter = JsonFormatter::new();
    for (name, text) in CASES {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, t| {
            b.iter(|| formatter.classify(black_box(t)));
        });
    }
    group.finish();
}

fn bench_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize");
    let formatter = JsonFormatter::new();
    for (name, text) in CASES {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, t| {
            b.iter(|| formatter.deserialize(black_box(t)));
        });
    }
    group.finish();
}

// ── serialize() per payload encoding ────────────────────────────────────

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let msg = VehicleMessage::from(CanMessage::new(1, 0x7df, vec![2, 1, 12, 0, 0, 0, 0, 0]))
        .with_timestamp(1_332_432_977_835);
    for encoding in PayloadEncoding::all() {
        let formatter = JsonFormatter::new().with_payload_encoding(*encoding);
        group.bench_with_input(BenchmarkId::from_parameter(encoding), &msg, |b, m| {
            b.iter(|| formatter.serialize(black_box(m)));
        });
    }
    group.finish();
}

// ── JsonStream over a batch ─────────────────────────────────────────────

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");
    for size in [10, 100, 1000] {
        let batch = JsonFormatter::new().serialize_batch(&trace(size));
        group.throughput(Throughput::Bytes(batch.len() as u64));
        group.bench_with_input(BenchmarkId::new("records", size), batch.as_bytes(), |b, bytes| {
            b.iter(|| {
                let mut stream = JsonStream::new();
                let out = stream.push(black_box(bytes));
                assert_eq!(out.len(), size);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_deserialize,
    bench_serialize,
    bench_stream,
);
criterion_main!(benches);
