// SPDX-License-Identifier: MIT OR Apache-2.0
//! The single failure kind of the codec.

use thiserror::Error;

/// Raised when text cannot be turned into a vehicle message.
///
/// Covers malformed JSON as well as well-formed JSON whose shape matches no
/// message variant. The [`Reason`] says which.
#[derive(Debug, Error)]
#[error("unrecognized message type: {reason}")]
pub struct UnrecognizedMessageType {
    reason: Reason,
}

/// Why a record was rejected.
#[derive(Debug, Error)]
pub enum Reason {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The JSON is valid but not an object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// The object's fields match no message shape.
    #[error("no message shape matches fields {fields:?}")]
    NoMatchingShape {
        /// Top-level keys of the rejected object.
        fields: Vec<String>,
    },

    /// A field is present but holds the wrong kind of value.
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        /// Offending key.
        field: String,
        /// Description of what was expected.
        expected: &'static str,
    },

    /// A streamed record exceeds the configured size limit.
    #[error("record length {len} exceeds maximum {max}")]
    RecordTooLong {
        /// Length of the record in bytes.
        len: usize,
        /// Configured limit.
        max: usize,
    },

    /// A streamed record is not UTF-8.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[source] std::str::Utf8Error),
}

impl UnrecognizedMessageType {
    /// The underlying cause.
    #[must_use]
    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// `true` when the input was not parseable JSON.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self.reason, Reason::InvalidJson(_))
    }

    pub(crate) fn invalid_field(field: impl Into<String>, expected: &'static str) -> Self {
        Reason::InvalidField {
            field: field.into(),
            expected,
        }
        .into()
    }
}

impl From<Reason> for UnrecognizedMessageType {
    fn from(reason: Reason) -> Self {
        Self { reason }
    }
}

impl From<serde_json::Error> for UnrecognizedMessageType {
    fn from(err: serde_json::Error) -> Self {
        Reason::InvalidJson(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = UnrecognizedMessageType::invalid_field("bus", "an integer 0-255");
        assert_eq!(
            err.to_string(),
            "unrecognized message type: field `bus` must be an integer 0-255"
        );
    }

    #[test]
    fn syntax_errors_are_flagged() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = UnrecognizedMessageType::from(json_err);
        assert!(err.is_syntax());
        assert!(matches!(err.reason(), Reason::InvalidJson(_)));
    }
}
