// SPDX-License-Identifier: MIT OR Apache-2.0
//! Flat JSON object → message, once the shape is known.

use crate::{UnrecognizedMessageType, extras, payload, timestamp};
use oxc_core::{
    CanMessage, Command, CommandResponse, DiagnosticRequest, DiagnosticResponse,
    EventedSimpleVehicleMessage, FieldValue, MessageKind, NamedVehicleMessage,
    SimpleVehicleMessage, Variant, VehicleMessage, fields::*,
};
use serde_json::{Map, Value};

type Result<T> = std::result::Result<T, UnrecognizedMessageType>;

/// Typed lookups over the object, failing on wrong types.
struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
}

impl FieldReader<'_> {
    fn optional<T>(
        &self,
        key: &str,
        expected: &'static str,
        parse: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.obj.get(key) {
            None => Ok(None),
            Some(v) => parse(v)
                .map(Some)
                .ok_or_else(|| UnrecognizedMessageType::invalid_field(key, expected)),
        }
    }

    fn required<T>(
        &self,
        key: &str,
        expected: &'static str,
        parse: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T> {
        self.optional(key, expected, parse)?
            .ok_or_else(|| UnrecognizedMessageType::invalid_field(key, expected))
    }

    fn uint<T: TryFrom<u64>>(&self, key: &str, expected: &'static str) -> Result<T> {
        self.required(key, expected, |v| as_uint(v))
    }

    fn opt_uint<T: TryFrom<u64>>(&self, key: &str, expected: &'static str) -> Result<Option<T>> {
        self.optional(key, expected, |v| as_uint(v))
    }

    fn string(&self, key: &str) -> Result<String> {
        self.required(key, "a string", |v| v.as_str().map(str::to_owned))
    }

    fn opt_string(&self, key: &str) -> Result<Option<String>> {
        self.optional(key, "a string", |v| v.as_str().map(str::to_owned))
    }

    fn bool(&self, key: &str) -> Result<bool> {
        self.required(key, "a boolean", Value::as_bool)
    }

    fn opt_bool(&self, key: &str) -> Result<Option<bool>> {
        self.optional(key, "a boolean", Value::as_bool)
    }

    fn opt_f64(&self, key: &str) -> Result<Option<f64>> {
        self.optional(key, "a number", Value::as_f64)
    }

    fn scalar(&self, key: &str) -> Result<FieldValue> {
        self.required(key, "a string, number or boolean", extras::value_from_json)
    }

    fn payload(&self, key: &str) -> Result<Vec<u8>> {
        self.required(key, payload::EXPECTED, payload::decode)
    }

    fn opt_payload(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.optional(key, payload::EXPECTED, payload::decode)
    }
}

/// Non-negative integer that fits `T`. Integral floats such as `1.0` count.
fn as_uint<T: TryFrom<u64>>(v: &Value) -> Option<T> {
    let n = v.as_u64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })?;
    T::try_from(n).ok()
}

const BYTE: &str = "an integer 0-255";
const U16: &str = "an integer 0-65535";
const U32: &str = "an integer 0-4294967295";

/// Build the message for an object already classified as `variant`.
///
/// # Errors
///
/// Fails when a field of the shape holds the wrong type, or when the
/// timestamp or an extra is malformed.
pub fn from_object(obj: &Map<String, Value>, variant: Variant) -> Result<VehicleMessage> {
    let r = FieldReader { obj };

    let kind = match variant {
        Variant::VehicleMessage => MessageKind::Generic,
        Variant::CanMessage => MessageKind::Can(CanMessage {
            bus: r.uint(BUS, BYTE)?,
            id: r.uint(ID, U32)?,
            payload: r.payload(PAYLOAD)?,
        }),
        Variant::DiagnosticRequest => MessageKind::DiagnosticRequest(DiagnosticRequest {
            bus: r.uint(BUS, BYTE)?,
            id: r.uint(ID, U32)?,
            mode: r.uint(MODE, BYTE)?,
            pid: r.uint(PID, U16)?,
            payload: r.opt_payload(PAYLOAD)?,
            multiple_responses: r.opt_bool(MULTIPLE_RESPONSES)?,
            frequency: r.opt_f64(FREQUENCY)?,
            name: r.opt_string(NAME)?,
        }),
        Variant::DiagnosticResponse => MessageKind::DiagnosticResponse(DiagnosticResponse {
            bus: r.uint(BUS, BYTE)?,
            id: r.uint(ID, U32)?,
            mode: r.uint(MODE, BYTE)?,
            pid: r.uint(PID, U16)?,
            success: r.bool(SUCCESS)?,
            payload: r.opt_payload(PAYLOAD)?,
            value: r.opt_f64(VALUE)?,
            negative_response_code: r.opt_uint(NEGATIVE_RESPONSE_CODE, BYTE)?,
        }),
        Variant::Command => MessageKind::Command(Command {
            name: r.string(COMMAND_NAME)?,
            action: r.opt_string(ACTION)?,
            bus: r.opt_uint(BUS, BYTE)?,
            enabled: r.opt_bool(ENABLED)?,
            bypass: r.opt_bool(BYPASS)?,
            format: r.opt_string(FORMAT)?,
        }),
        Variant::CommandResponse => MessageKind::CommandResponse(CommandResponse {
            command: r.string(COMMAND_RESPONSE)?,
            message: r.opt_string(MESSAGE)?,
            status: r.opt_bool(STATUS)?,
        }),
        Variant::SimpleVehicleMessage => MessageKind::Simple(SimpleVehicleMessage {
            name: r.string(NAME)?,
            value: r.scalar(VALUE)?,
        }),
        Variant::EventedSimpleVehicleMessage => {
            MessageKind::EventedSimple(EventedSimpleVehicleMessage {
                name: r.string(NAME)?,
                value: r.scalar(VALUE)?,
                event: r.scalar(EVENT)?,
            })
        }
        Variant::NamedVehicleMessage => MessageKind::Named(NamedVehicleMessage {
            name: r.string(NAME)?,
        }),
    };

    Ok(VehicleMessage {
        timestamp: timestamp::decode(obj.get(TIMESTAMP))?,
        extras: extras::decode(obj, variant.schema())?,
        kind,
    })
}
