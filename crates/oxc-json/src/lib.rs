// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # oxc-json
//!
//! JSON codec for OpenXC vehicle messages.
//!
//! Every message is written as one flat JSON object with no type tag. On the
//! way back in, the variant is inferred from which keys are present (see
//! [`infer`]), the shape's fields are read, `timestamp` is decoded, and every
//! remaining key is kept as an extra.
//!
//! ```
//! use oxc_core::{SimpleVehicleMessage, VehicleMessage};
//!
//! let msg = VehicleMessage::from(SimpleVehicleMessage::new("vehicle_speed", 42))
//!     .with_timestamp(1_332_432_977_835);
//! let text = oxc_json::serialize(&msg);
//! assert_eq!(oxc_json::deserialize(&text).unwrap(), msg);
//! ```

pub mod de;
pub mod error;
pub mod extras;
pub mod infer;
pub mod payload;
pub mod ser;
pub mod stream;
pub mod timestamp;

pub use error::{Reason, UnrecognizedMessageType};
pub use payload::PayloadEncoding;

use oxc_core::{Variant, VehicleMessage};
use serde_json::Value;

/// Stateless, configurable JSON codec.
///
/// The free functions [`serialize`], [`deserialize`] and [`classify`] use
/// the default formatter: array payloads, compact output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormatter {
    payload_encoding: PayloadEncoding,
    pretty: bool,
}

impl JsonFormatter {
    /// Formatter with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write payloads using `encoding`.
    #[must_use]
    pub fn with_payload_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.payload_encoding = encoding;
        self
    }

    /// Emit indented, multi-line JSON from [`serialize`](Self::serialize).
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Configured payload encoding.
    #[must_use]
    pub fn payload_encoding(&self) -> PayloadEncoding {
        self.payload_encoding
    }

    /// Whether output is pretty-printed.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Build the JSON value for `msg`.
    #[must_use]
    pub fn to_value(&self, msg: &VehicleMessage) -> Value {
        Value::Object(ser::to_object(msg, self.payload_encoding))
    }

    /// Serialize `msg` to JSON text. Never fails.
    #[must_use]
    pub fn serialize(&self, msg: &VehicleMessage) -> String {
        let value = self.to_value(msg);
        if self.pretty {
            format!("{value:#}")
        } else {
            value.to_string()
        }
    }

    /// Serialize `msgs` as newline-terminated records.
    ///
    /// Records are always compact, whatever [`pretty`](Self::pretty) says,
    /// so the result can be split back with [`deserialize_batch`](Self::deserialize_batch).
    #[must_use]
    pub fn serialize_batch(&self, msgs: &[VehicleMessage]) -> String {
        let mut out = String::new();
        for msg in msgs {
            out.push_str(&self.to_value(msg).to_string());
            out.push('\n');
        }
        out
    }

    /// Parse JSON text into a message.
    ///
    /// # Errors
    ///
    /// [`UnrecognizedMessageType`] when `text` is not valid JSON, is not an
    /// object, or matches no message shape.
    pub fn deserialize(&self, text: &str) -> Result<VehicleMessage, UnrecognizedMessageType> {
        let value: Value = serde_json::from_str(text)?;
        self.deserialize_value(&value)
    }

    /// Build a message from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// As [`deserialize`](Self::deserialize), minus syntax errors.
    pub fn deserialize_value(&self, value: &Value) -> Result<VehicleMessage, UnrecognizedMessageType> {
        let obj = value.as_object().ok_or_else(|| Reason::NotAnObject {
            found: infer::json_type_name(value),
        })?;
        let variant = infer::infer(obj)?;
        de::from_object(obj, variant)
    }

    /// Decode every non-blank newline- or NUL-delimited record in `input`.
    pub fn deserialize_batch(
        &self,
        input: &str,
    ) -> Vec<Result<VehicleMessage, UnrecognizedMessageType>> {
        input
            .split(['\n', '\0'])
            .map(str::trim)
            .filter(|record| !record.is_empty())
            .map(|record| self.deserialize(record))
            .collect()
    }

    /// Infer the variant of `text` without building the message.
    ///
    /// # Errors
    ///
    /// As [`deserialize`](Self::deserialize), except that field types are
    /// not checked.
    pub fn classify(&self, text: &str) -> Result<Variant, UnrecognizedMessageType> {
        let value: Value = serde_json::from_str(text)?;
        infer::infer_value(&value)
    }
}

/// Serialize `msg` with the default formatter.
#[must_use]
pub fn serialize(msg: &VehicleMessage) -> String {
    JsonFormatter::new().serialize(msg)
}

/// Deserialize `text` with the default formatter.
///
/// # Errors
///
/// See [`JsonFormatter::deserialize`].
pub fn deserialize(text: &str) -> Result<VehicleMessage, UnrecognizedMessageType> {
    JsonFormatter::new().deserialize(text)
}

/// Infer the variant of `text`.
///
/// # Errors
///
/// See [`JsonFormatter::classify`].
pub fn classify(text: &str) -> Result<Variant, UnrecognizedMessageType> {
    JsonFormatter::new().classify(text)
}
