// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # oxc-core
//!
//! The vehicle message model: one [`VehicleMessage`] envelope carrying an
//! optional timestamp, free-form [`Extras`], and a [`MessageKind`] that holds
//! the concrete shape.
//!
//! This crate knows nothing about wire formats. The per-shape field tables in
//! [`Variant::schema`] are the only wire-facing detail it exposes.

pub mod fields;
pub mod message;
pub mod value;

pub use message::{
    CanMessage, Command, CommandResponse, DiagnosticRequest, DiagnosticResponse,
    EventedSimpleVehicleMessage, NamedVehicleMessage, SimpleVehicleMessage,
};
pub use value::{Extras, FieldValue};

use serde::{Deserialize, Serialize};

// ── Variant tags ────────────────────────────────────────────────────────

/// Discriminant of a [`MessageKind`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Raw CAN frame.
    CanMessage,
    /// Diagnostic request.
    DiagnosticRequest,
    /// Diagnostic response.
    DiagnosticResponse,
    /// Control command.
    Command,
    /// Reply to a control command.
    CommandResponse,
    /// Name/value signal.
    SimpleVehicleMessage,
    /// Name/value/event signal.
    EventedSimpleVehicleMessage,
    /// Name-only message.
    NamedVehicleMessage,
    /// Message with no known fields, only extras.
    VehicleMessage,
}

/// Field-name table for one [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Fields that are always present, in wire order.
    pub required: &'static [&'static str],
    /// Fields that appear only when set, in wire order.
    pub optional: &'static [&'static str],
}

impl Schema {
    /// Whether `field` belongs to this shape.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.required.contains(&field) || self.optional.contains(&field)
    }

    /// Required then optional fields.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> {
        self.required.iter().chain(self.optional).copied()
    }
}

impl Variant {
    /// Human-readable label for this variant.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CanMessage => "CanMessage",
            Self::DiagnosticRequest => "DiagnosticRequest",
            Self::DiagnosticResponse => "DiagnosticResponse",
            Self::Command => "Command",
            Self::CommandResponse => "CommandResponse",
            Self::SimpleVehicleMessage => "SimpleVehicleMessage",
            Self::EventedSimpleVehicleMessage => "EventedSimpleVehicleMessage",
            Self::NamedVehicleMessage => "NamedVehicleMessage",
            Self::VehicleMessage => "VehicleMessage",
        }
    }

    /// Returns all variants.
    #[must_use]
    pub fn all() -> &'static [Variant] {
        &[
            Self::CanMessage,
            Self::DiagnosticRequest,
            Self::DiagnosticResponse,
            Self::Command,
            Self::CommandResponse,
            Self::SimpleVehicleMessage,
            Self::EventedSimpleVehicleMessage,
            Self::NamedVehicleMessage,
            Self::VehicleMessage,
        ]
    }

    /// The field-name table for this variant.
    #[must_use]
    pub fn schema(self) -> &'static Schema {
        use fields::*;
        match self {
            Self::CanMessage => &Schema {
                required: &[ID, BUS, PAYLOAD],
                optional: &[],
            },
            Self::DiagnosticRequest => &Schema {
                required: &[BUS, ID, MODE, PID],
                optional: &[PAYLOAD, MULTIPLE_RESPONSES, FREQUENCY, NAME],
            },
            Self::DiagnosticResponse => &Schema {
                required: &[BUS, ID, MODE, PID, SUCCESS],
                optional: &[PAYLOAD, VALUE, NEGATIVE_RESPONSE_CODE],
            },
            Self::Command => &Schema {
                required: &[COMMAND_NAME],
                optional: &[ACTION, BUS, ENABLED, BYPASS, FORMAT],
            },
            Self::CommandResponse => &Schema {
                required: &[COMMAND_RESPONSE],
                optional: &[MESSAGE, STATUS],
            },
            Self::SimpleVehicleMessage => &Schema {
                required: &[NAME, VALUE],
                optional: &[],
            },
            Self::EventedSimpleVehicleMessage => &Schema {
                required: &[NAME, VALUE, EVENT],
                optional: &[],
            },
            Self::NamedVehicleMessage => &Schema {
                required: &[NAME],
                optional: &[],
            },
            Self::VehicleMessage => &Schema {
                required: &[],
                optional: &[],
            },
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Messages ────────────────────────────────────────────────────────────

/// The concrete shape of a [`VehicleMessage`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MessageKind {
    /// No known fields.
    #[default]
    Generic,
    /// See [`CanMessage`].
    Can(CanMessage),
    /// See [`DiagnosticRequest`].
    DiagnosticRequest(DiagnosticRequest),
    /// See [`DiagnosticResponse`].
    DiagnosticResponse(DiagnosticResponse),
    /// See [`Command`].
    Command(Command),
    /// See [`CommandResponse`].
    CommandResponse(CommandResponse),
    /// See [`SimpleVehicleMessage`].
    Simple(SimpleVehicleMessage),
    /// See [`EventedSimpleVehicleMessage`].
    EventedSimple(EventedSimpleVehicleMessage),
    /// See [`NamedVehicleMessage`].
    Named(NamedVehicleMessage),
}

impl MessageKind {
    /// The data-less discriminant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        match self {
            Self::Generic => Variant::VehicleMessage,
            Self::Can(_) => Variant::CanMessage,
            Self::DiagnosticRequest(_) => Variant::DiagnosticRequest,
            Self::DiagnosticResponse(_) => Variant::DiagnosticResponse,
            Self::Command(_) => Variant::Command,
            Self::CommandResponse(_) => Variant::CommandResponse,
            Self::Simple(_) => Variant::SimpleVehicleMessage,
            Self::EventedSimple(_) => Variant::EventedSimpleVehicleMessage,
            Self::Named(_) => Variant::NamedVehicleMessage,
        }
    }

    /// The message name, for the shapes that carry one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Simple(m) => Some(&m.name),
            Self::EventedSimple(m) => Some(&m.name),
            Self::Named(m) => Some(&m.name),
            Self::DiagnosticRequest(m) => m.name.as_deref(),
            _ => None,
        }
    }
}

/// A vehicle message: shape, optional timestamp and extras.
///
/// Messages are plain values. Equality compares all three parts; numbers
/// compare as `f64`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VehicleMessage {
    /// Milliseconds since the Unix epoch, or `None` when not timestamped.
    pub timestamp: Option<u64>,
    /// Attributes outside the shape's schema.
    pub extras: Extras,
    /// The concrete shape.
    pub kind: MessageKind,
}

impl VehicleMessage {
    /// Wrap `kind` with no timestamp and no extras.
    #[must_use]
    pub fn new(kind: impl Into<MessageKind>) -> Self {
        Self {
            timestamp: None,
            extras: Extras::new(),
            kind: kind.into(),
        }
    }

    /// An empty generic message.
    #[must_use]
    pub fn generic() -> Self {
        Self::default()
    }

    /// A generic message carrying only `extras`.
    #[must_use]
    pub fn from_extras(extras: Extras) -> Self {
        Self {
            extras,
            ..Self::default()
        }
    }

    /// Replace the extras.
    #[must_use]
    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = extras;
        self
    }

    /// Add one extra attribute.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Set the timestamp in milliseconds since the epoch.
    #[must_use]
    pub fn with_timestamp(mut self, millis: u64) -> Self {
        self.timestamp = Some(millis);
        self
    }

    /// Stamp the message with the current wall-clock time.
    pub fn timestamp_now(&mut self) {
        let now = chrono::Utc::now().timestamp_millis();
        self.timestamp = u64::try_from(now).ok();
    }

    /// Clear the timestamp.
    pub fn untimestamp(&mut self) {
        self.timestamp = None;
    }

    /// Whether a timestamp is set.
    #[must_use]
    pub fn is_timestamped(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Shorthand for `self.kind.variant()`.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.kind.variant()
    }
}

impl From<MessageKind> for VehicleMessage {
    fn from(kind: MessageKind) -> Self {
        Self::new(kind)
    }
}

macro_rules! impl_into_kind {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for MessageKind {
                fn from(m: $ty) -> Self {
                    Self::$variant(m)
                }
            }

            impl From<$ty> for VehicleMessage {
                fn from(m: $ty) -> Self {
                    Self::new(m)
                }
            }
        )*
    };
}

impl_into_kind! {
    CanMessage => Can,
    DiagnosticRequest => DiagnosticRequest,
    DiagnosticResponse => DiagnosticResponse,
    Command => Command,
    CommandResponse => CommandResponse,
    SimpleVehicleMessage => Simple,
    EventedSimpleVehicleMessage => EventedSimple,
    NamedVehicleMessage => Named,
}
