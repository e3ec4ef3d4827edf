// SPDX-License-Identifier: MIT OR Apache-2.0
//! Millisecond timestamps on the wire as fractional seconds.

use crate::UnrecognizedMessageType;
use oxc_core::fields;
use serde_json::Value;

/// Encode `millis` as a JSON number of seconds, e.g. `1332432977835` becomes
/// `1332432977.835`.
#[must_use]
pub fn encode(millis: u64) -> Value {
    Value::from(millis as f64 / 1000.0)
}

/// Decode a `timestamp` field. An absent field decodes to `None`.
///
/// # Errors
///
/// Fails when the field is present but not a non-negative number.
pub fn decode(field: Option<&Value>) -> Result<Option<u64>, UnrecognizedMessageType> {
    let Some(value) = field else {
        return Ok(None);
    };
    let seconds = value
        .as_f64()
        .filter(|s| s.is_finite() && *s >= 0.0)
        .ok_or_else(|| {
            UnrecognizedMessageType::invalid_field(fields::TIMESTAMP, "a non-negative number")
        })?;
    Ok(Some((seconds * 1000.0).round() as u64))
}
