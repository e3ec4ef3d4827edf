// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output formatting utilities for the `oxc` CLI.

use chrono::{DateTime, SecondsFormat, Utc};
use oxc_core::{FieldValue, MessageKind, VehicleMessage};
use oxc_json::JsonFormatter;
use serde_json::json;
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

/// Supported output formats for decoded messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One human-readable line per message.
    #[default]
    Text,
    /// One JSON object per message: variant, timestamp and wire form.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Json => "json",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Render a millisecond timestamp as RFC 3339, falling back to the raw number.
#[must_use]
pub fn format_timestamp(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| format!("{millis}ms"))
}

fn quote(v: &FieldValue) -> String {
    match v {
        FieldValue::String(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Format `msg` as a single line of `key=value` pairs.
#[must_use]
pub fn format_message_text(msg: &VehicleMessage) -> String {
    let mut out = msg.variant().label().to_string();
    let mut field = |key: &str, value: String| {
        let _ = write!(out, " {key}={value}");
    };

    match &msg.kind {
        MessageKind::Generic => {}
        MessageKind::Can(m) => {
            field("bus", m.bus.to_string());
            field("id", format!("{:#x}", m.id));
            field("payload", hex(&m.payload));
        }
        MessageKind::DiagnosticRequest(m) => {
            field("bus", m.bus.to_string());
            field("id", format!("{:#x}", m.id));
            field("mode", format!("{:#x}", m.mode));
            field("pid", format!("{:#x}", m.pid));
            if let Some(p) = &m.payload {
                field("payload", hex(p));
            }
            if let Some(hz) = m.frequency {
                field("frequency", hz.to_string());
            }
            if let Some(name) = &m.name {
                field("name", format!("{name:?}"));
            }
        }
        MessageKind::DiagnosticResponse(m) => {
            field("bus", m.bus.to_string());
            field("id", format!("{:#x}", m.id));
            field("mode", format!("{:#x}", m.mode));
            field("pid", format!("{:#x}", m.pid));
            field("success", m.success.to_string());
            if let Some(v) = m.value {
                field("value", v.to_string());
            }
            if let Some(code) = m.negative_response_code {
                field("nrc", format!("{code:#x}"));
            }
        }
        MessageKind::Command(m) => {
            field("command", format!("{:?}", m.name));
            if let Some(a) = &m.action {
                field("action", format!("{a:?}"));
            }
        }
        MessageKind::CommandResponse(m) => {
            field("command", format!("{:?}", m.command));
            if let Some(s) = m.status {
                field("status", s.to_string());
            }
            if let Some(text) = &m.message {
                field("message", format!("{text:?}"));
            }
        }
        MessageKind::Simple(m) => {
            field("name", format!("{:?}", m.name));
            field("value", quote(&m.value));
        }
        MessageKind::EventedSimple(m) => {
            field("name", format!("{:?}", m.name));
            field("value", quote(&m.value));
            field("event", quote(&m.event));
        }
        MessageKind::Named(m) => {
            field("name", format!("{:?}", m.name));
        }
    }

    if let Some(ts) = msg.timestamp {
        field("at", format_timestamp(ts));
    }
    for (key, value) in &msg.extras {
        field(key.as_str(), quote(value));
    }
    out
}

/// Format `msg` as a JSON object describing it.
#[must_use]
pub fn format_message_json(msg: &VehicleMessage, formatter: &JsonFormatter) -> String {
    json!({
        "variant": msg.variant(),
        "timestamp_ms": msg.timestamp,
        "message": formatter.to_value(msg),
    })
    .to_string()
}

/// Format `msg` in the requested format.
#[must_use]
pub fn format_message(msg: &VehicleMessage, format: OutputFormat, formatter: &JsonFormatter) -> String {
    match format {
        OutputFormat::Text => format_message_text(msg),
        OutputFormat::Json => format_message_json(msg, formatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_core::{CanMessage, SimpleVehicleMessage};

    #[test]
    fn output_format_parses() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn timestamp_is_rfc3339() {
        assert_eq!(format_timestamp(1_332_432_977_835), "2012-03-22T16:16:17.835Z");
    }

    #[test]
    fn text_line_for_can_message() {
        let msg = VehicleMessage::from(CanMessage::new(1, 0x7df, vec![0x02, 0x01]));
        assert_eq!(format_message_text(&msg), "CanMessage bus=1 id=0x7df payload=0201");
    }

    #[test]
    fn text_line_includes_timestamp_and_extras() {
        let msg = VehicleMessage::from(SimpleVehicleMessage::new("speed", 42))
            .with_timestamp(0)
            .with_extra("unit", "kph");
        assert_eq!(
            format_message_text(&msg),
            "SimpleVehicleMessage name=\"speed\" value=42 at=1970-01-01T00:00:00.000Z unit=\"kph\""
        );
    }

    #[test]
    fn json_line_carries_variant() {
        let msg = VehicleMessage::from(SimpleVehicleMessage::new("speed", 42));
        let v: serde_json::Value =
            serde_json::from_str(&format_message_json(&msg, &JsonFormatter::new())).unwrap();
        assert_eq!(v["variant"], "simple_vehicle_message");
        assert!(v["timestamp_ms"].is_null());
        assert_eq!(v["message"]["name"], "speed");
    }
}
