// SPDX-License-Identifier: MIT OR Apache-2.0
//! Message → flat JSON object.

use crate::{PayloadEncoding, extras, infer, payload, timestamp};
use oxc_core::{FieldValue, MessageKind, VehicleMessage, fields::*};
use serde_json::{Map, Value};
use tracing::warn;

/// Writes fields in call order, skipping unset optionals.
struct ObjectWriter {
    obj: Map<String, Value>,
    encoding: PayloadEncoding,
}

impl ObjectWriter {
    fn put(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.obj.insert(key.to_owned(), value.into());
        self
    }

    fn put_opt<T: Into<Value>>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.put(key, v);
        }
        self
    }

    /// NaN and infinities have no JSON spelling; such a field is left out.
    fn scalar(&mut self, key: &str, value: &FieldValue) -> &mut Self {
        match extras::value_to_json(value) {
            Some(json) => self.put(key, json),
            None => {
                warn!(target: "oxc.json", key, %value, "non-finite number has no JSON form; dropped");
                self
            }
        }
    }

    fn number_opt(&mut self, key: &str, value: Option<f64>) -> &mut Self {
        if let Some(n) = value {
            self.scalar(key, &FieldValue::Number(n));
        }
        self
    }

    fn payload(&mut self, key: &str, bytes: &[u8]) -> &mut Self {
        let encoded = payload::encode(bytes, self.encoding);
        self.put(key, encoded)
    }

    fn payload_opt(&mut self, key: &str, bytes: Option<&[u8]>) -> &mut Self {
        if let Some(b) = bytes {
            self.payload(key, b);
        }
        self
    }
}

/// Build the JSON object for `msg`.
///
/// Key order: required fields, populated optional fields, `timestamp`, then
/// extras in key order.
///
/// Extras are written even when their keys make the object read back as a
/// different shape; that case is logged at warn level.
#[must_use]
pub fn to_object(msg: &VehicleMessage, encoding: PayloadEncoding) -> Map<String, Value> {
    let mut w = ObjectWriter {
        obj: Map::new(),
        encoding,
    };

    match &msg.kind {
        MessageKind::Generic => {}
        MessageKind::Can(m) => {
            w.put(ID, m.id).put(BUS, m.bus).payload(PAYLOAD, &m.payload);
        }
        MessageKind::DiagnosticRequest(m) => {
            w.put(BUS, m.bus)
                .put(ID, m.id)
                .put(MODE, m.mode)
                .put(PID, m.pid)
                .payload_opt(PAYLOAD, m.payload.as_deref())
                .put_opt(MULTIPLE_RESPONSES, m.multiple_responses)
                .number_opt(FREQUENCY, m.frequency)
                .put_opt(NAME, m.name.clone());
        }
        MessageKind::DiagnosticResponse(m) => {
            w.put(BUS, m.bus)
                .put(ID, m.id)
                .put(MODE, m.mode)
                .put(PID, m.pid)
                .put(SUCCESS, m.success)
                .payload_opt(PAYLOAD, m.payload.as_deref())
                .number_opt(VALUE, m.value)
                .put_opt(NEGATIVE_RESPONSE_CODE, m.negative_response_code);
        }
        MessageKind::Command(m) => {
            w.put(COMMAND_NAME, m.name.clone())
                .put_opt(ACTION, m.action.clone())
                .put_opt(BUS, m.bus)
                .put_opt(ENABLED, m.enabled)
                .put_opt(BYPASS, m.bypass)
                .put_opt(FORMAT, m.format.clone());
        }
        MessageKind::CommandResponse(m) => {
            w.put(COMMAND_RESPONSE, m.command.clone())
                .put_opt(MESSAGE, m.message.clone())
                .put_opt(STATUS, m.status);
        }
        MessageKind::Simple(m) => {
            w.put(NAME, m.name.clone()).scalar(VALUE, &m.value);
        }
        MessageKind::EventedSimple(m) => {
            w.put(NAME, m.name.clone())
                .scalar(VALUE, &m.value)
                .scalar(EVENT, &m.event);
        }
        MessageKind::Named(m) => {
            w.put(NAME, m.name.clone());
        }
    }

    if let Some(ms) = msg.timestamp {
        w.put(TIMESTAMP, timestamp::encode(ms));
    }

    let mut obj = w.obj;
    extras::encode(&msg.extras, msg.variant().schema(), &mut obj);

    let written = msg.variant();
    let read_back = infer::resolve(&obj).map(|rule| rule.variant);
    if read_back != Some(written) {
        warn!(
            target: "oxc.json",
            %written,
            read_back = ?read_back,
            "serialized object will not decode as the same message shape"
        );
    }
    obj
}
