// SPDX-License-Identifier: MIT OR Apache-2.0
//! Extras: attributes outside a message's schema, flattened into the object.

use crate::UnrecognizedMessageType;
use oxc_core::{Extras, FieldValue, Schema, fields};
use serde_json::{Map, Number, Value};
use tracing::warn;

/// Convert a scalar to its JSON form, or `None` for NaN and infinities.
#[must_use]
pub fn value_to_json(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::Number(n) => Number::from_f64(*n).map(Value::Number),
        FieldValue::Bool(b) => Some(Value::Bool(*b)),
        FieldValue::String(s) => Some(Value::String(s.clone())),
    }
}

/// Convert a JSON scalar, or `None` for null, arrays and objects.
#[must_use]
pub fn value_from_json(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Number(n) => n.as_f64().map(FieldValue::Number),
        Value::Bool(b) => Some(FieldValue::Bool(*b)),
        Value::String(s) => Some(FieldValue::String(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Append `extras` to `obj` under their own keys.
///
/// `timestamp` and the shape's own fields, set or not, are never written from
/// extras; a colliding extra is dropped. So is a non-finite number.
pub fn encode(extras: &Extras, schema: &Schema, obj: &mut Map<String, Value>) {
    for (key, value) in extras {
        if key == fields::TIMESTAMP || schema.contains(key) || obj.contains_key(key) {
            warn!(target: "oxc.json", %key, "extra collides with a message field; dropped");
            continue;
        }
        let Some(json) = value_to_json(value) else {
            warn!(target: "oxc.json", %key, %value, "non-finite number has no JSON form; dropped");
            continue;
        };
        obj.insert(key.clone(), json);
    }
}

/// Collect every key of `obj` outside `schema` (and other than `timestamp`).
///
/// # Errors
///
/// Fails when a leftover field is not a string, number or boolean.
pub fn decode(obj: &Map<String, Value>, schema: &Schema) -> Result<Extras, UnrecognizedMessageType> {
    obj.iter()
        .filter(|(key, _)| key.as_str() != fields::TIMESTAMP && !schema.contains(key))
        .map(|(key, value)| {
            value_from_json(value)
                .map(|v| (key.clone(), v))
                .ok_or_else(|| {
                    UnrecognizedMessageType::invalid_field(
                        key.as_str(),
                        "a string, number or boolean",
                    )
                })
        })
        .collect()
}
