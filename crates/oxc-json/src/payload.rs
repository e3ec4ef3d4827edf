// SPDX-License-Identifier: MIT OR Apache-2.0
//! Byte payloads on the wire.
//!
//! Two encodings exist: a JSON array of integers `0..=255` (the default) and
//! a `0x`-prefixed hex string. The decoder accepts either.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// How `payload` fields are written.
///
/// Serialized by its lowercase name (`"array"`, `"hex"`), which is how
/// configuration files spell it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PayloadEncoding {
    /// `[1, 2, 3, 4]`
    #[default]
    Array,
    /// `"0x01020304"`
    Hex,
}

impl PayloadEncoding {
    /// All encodings, in declaration order.
    #[must_use]
    pub fn all() -> &'static [PayloadEncoding] {
        &[Self::Array, Self::Hex]
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Array => "array",
            Self::Hex => "hex",
        };
        f.write_str(s)
    }
}

impl FromStr for PayloadEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "array" => Ok(Self::Array),
            "hex" => Ok(Self::Hex),
            other => Err(format!("unknown payload encoding: {other}")),
        }
    }
}

/// Description used in errors for a malformed payload.
pub(crate) const EXPECTED: &str = "an array of integers 0-255 or a 0x-prefixed hex string";

/// Encode `bytes` in the given form.
#[must_use]
pub fn encode(bytes: &[u8], encoding: PayloadEncoding) -> Value {
    match encoding {
        PayloadEncoding::Array => Value::Array(bytes.iter().map(|&b| Value::from(b)).collect()),
        PayloadEncoding::Hex => {
            let mut s = String::with_capacity(2 + bytes.len() * 2);
            s.push_str("0x");
            for b in bytes {
                s.push_str(&format!("{b:02x}"));
            }
            Value::String(s)
        }
    }
}

/// Decode a payload written in either form. Returns `None` when malformed.
#[must_use]
pub fn decode(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
            .collect(),
        Value::String(s) => decode_hex(s),
        _ => None,
    }
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() % 2 != 0 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
        .collect()
}
