// SPDX-License-Identifier: MIT OR Apache-2.0
//! Concrete message shapes.
//!
//! Each struct holds only the fields of its shape. Timestamps and extras live
//! on the enclosing [`VehicleMessage`](crate::VehicleMessage).

use crate::FieldValue;

/// A raw CAN frame observed on a bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanMessage {
    /// Bus number the frame was seen on.
    pub bus: u8,
    /// Arbitration ID.
    pub id: u32,
    /// Frame data.
    pub payload: Vec<u8>,
}

impl CanMessage {
    /// Create a CAN message.
    #[must_use]
    pub fn new(bus: u8, id: u32, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            bus,
            id,
            payload: payload.into(),
        }
    }
}

/// A request for an OBD-II or UDS diagnostic value.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticRequest {
    /// Bus to send the request on.
    pub bus: u8,
    /// Arbitration ID of the target module.
    pub id: u32,
    /// Diagnostic service mode.
    pub mode: u8,
    /// Parameter ID.
    pub pid: u16,
    /// Extra request data.
    pub payload: Option<Vec<u8>>,
    /// Whether to wait for responses from more than one module.
    pub multiple_responses: Option<bool>,
    /// Repeat frequency in Hz.
    pub frequency: Option<f64>,
    /// Name to publish responses under.
    pub name: Option<String>,
}

impl DiagnosticRequest {
    /// Create a one-shot request with no optional fields.
    #[must_use]
    pub fn new(bus: u8, id: u32, mode: u8, pid: u16) -> Self {
        Self {
            bus,
            id,
            mode,
            pid,
            payload: None,
            multiple_responses: None,
            frequency: None,
            name: None,
        }
    }

    /// Attach request data.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Set whether multiple responses are expected.
    #[must_use]
    pub fn with_multiple_responses(mut self, multiple: bool) -> Self {
        self.multiple_responses = Some(multiple);
        self
    }

    /// Make the request recurring at `hz`.
    #[must_use]
    pub fn with_frequency(mut self, hz: f64) -> Self {
        self.frequency = Some(hz);
        self
    }

    /// Publish responses under `name`.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The answer to a [`DiagnosticRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticResponse {
    /// Bus the response arrived on.
    pub bus: u8,
    /// Arbitration ID of the responding module.
    pub id: u32,
    /// Diagnostic service mode.
    pub mode: u8,
    /// Parameter ID.
    pub pid: u16,
    /// Whether the module answered positively.
    pub success: bool,
    /// Raw response data.
    pub payload: Option<Vec<u8>>,
    /// Decoded value, when the parameter has a known formula.
    pub value: Option<f64>,
    /// Negative response code, set when `success` is false.
    pub negative_response_code: Option<u8>,
}

impl DiagnosticResponse {
    /// Create a response with no optional fields.
    #[must_use]
    pub fn new(bus: u8, id: u32, mode: u8, pid: u16, success: bool) -> Self {
        Self {
            bus,
            id,
            mode,
            pid,
            success,
            payload: None,
            value: None,
            negative_response_code: None,
        }
    }

    /// Attach raw response data.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Attach a decoded value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Attach a negative response code.
    #[must_use]
    pub fn with_negative_response_code(mut self, code: u8) -> Self {
        self.negative_response_code = Some(code);
        self
    }
}

/// A control command sent to a vehicle interface.
///
/// Besides the command name and `action`, the known command arguments are
/// `bus`, `enabled`, `bypass` and `format`. Anything else is an extra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command name, e.g. `"version"` or `"passthrough"`.
    pub name: String,
    /// Sub-action, e.g. `"add"` or `"cancel"`.
    pub action: Option<String>,
    /// Bus the command applies to.
    pub bus: Option<u8>,
    /// Enable or disable the feature the command controls.
    pub enabled: Option<bool>,
    /// Bypass the acceptance filter.
    pub bypass: Option<bool>,
    /// Output format to switch to.
    pub format: Option<String>,
}

impl Command {
    /// Create a command with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: None,
            bus: None,
            enabled: None,
            bypass: None,
            format: None,
        }
    }

    /// Set the sub-action.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the target bus.
    #[must_use]
    pub fn with_bus(mut self, bus: u8) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the bypass flag.
    #[must_use]
    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass = Some(bypass);
        self
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// The reply to a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    /// Name of the command being answered.
    pub command: String,
    /// Human-readable result.
    pub message: Option<String>,
    /// Whether the command succeeded.
    pub status: Option<bool>,
}

impl CommandResponse {
    /// Create a bare response.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            message: None,
            status: None,
        }
    }

    /// Attach a result message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a status flag.
    #[must_use]
    pub fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }
}

/// A named signal and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleVehicleMessage {
    /// Signal name, e.g. `"vehicle_speed"`.
    pub name: String,
    /// Signal value.
    pub value: FieldValue,
}

impl SimpleVehicleMessage {
    /// Create a simple message.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named signal whose value is qualified by an event, e.g. a door status.
#[derive(Debug, Clone, PartialEq)]
pub struct EventedSimpleVehicleMessage {
    /// Signal name.
    pub name: String,
    /// Signal value.
    pub value: FieldValue,
    /// Event qualifier.
    pub event: FieldValue,
}

impl EventedSimpleVehicleMessage {
    /// Create an evented message.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value: impl Into<FieldValue>,
        event: impl Into<FieldValue>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            event: event.into(),
        }
    }
}

/// A message that only carries a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedVehicleMessage {
    /// Message name.
    pub name: String,
}

impl NamedVehicleMessage {
    /// Create a named message.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
