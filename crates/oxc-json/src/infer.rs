// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shape inference: which variant does a JSON object hold?
//!
//! The wire format has no type tag. Variants are told apart by which keys are
//! present, using an ordered rule list evaluated top to bottom. Several
//! shapes overlap (`bus`/`id` on CAN and diagnostic messages, `name` on three
//! signal shapes), so the order is part of the format: the most restrictive
//! shape is tested first and a broader one never wins by default.

use crate::UnrecognizedMessageType;
use crate::error::Reason;
use oxc_core::{Variant, fields::*};
use serde_json::{Map, Value};
use tracing::debug;

type Object = Map<String, Value>;

/// One entry of the resolver: a predicate over the object's keys.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Variant produced when the predicate holds.
    pub variant: Variant,
    /// Human-readable statement of the predicate.
    pub description: &'static str,
    matches: fn(&Object) -> bool,
}

impl Rule {
    /// Evaluate this rule against `obj`.
    #[must_use]
    pub fn matches(&self, obj: &Object) -> bool {
        (self.matches)(obj)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("variant", &self.variant)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

fn has_all(obj: &Object, keys: &[&str]) -> bool {
    keys.iter().all(|k| obj.contains_key(*k))
}

fn has_any(obj: &Object, keys: &[&str]) -> bool {
    keys.iter().any(|k| obj.contains_key(*k))
}

/// The resolver, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        variant: Variant::CanMessage,
        description: "id, bus and payload without mode or pid",
        matches: |o| has_all(o, &[ID, BUS, PAYLOAD]) && !has_any(o, &[MODE, PID]),
    },
    Rule {
        variant: Variant::DiagnosticResponse,
        description: "bus, id, mode, pid and success",
        matches: |o| has_all(o, &[BUS, ID, MODE, PID, SUCCESS]),
    },
    Rule {
        variant: Variant::DiagnosticRequest,
        description: "bus, id, mode and pid without success",
        matches: |o| has_all(o, &[BUS, ID, MODE, PID]) && !o.contains_key(SUCCESS),
    },
    Rule {
        variant: Variant::CommandResponse,
        description: "command_response",
        matches: |o| o.contains_key(COMMAND_RESPONSE),
    },
    Rule {
        variant: Variant::Command,
        description: "command_name",
        matches: |o| o.contains_key(COMMAND_NAME),
    },
    Rule {
        variant: Variant::EventedSimpleVehicleMessage,
        description: "name, value and event",
        matches: |o| has_all(o, &[NAME, VALUE, EVENT]),
    },
    Rule {
        variant: Variant::SimpleVehicleMessage,
        description: "name and value without event",
        matches: |o| has_all(o, &[NAME, VALUE]) && !o.contains_key(EVENT),
    },
    Rule {
        variant: Variant::NamedVehicleMessage,
        description: "name without value or event",
        matches: |o| o.contains_key(NAME) && !has_any(o, &[VALUE, EVENT]),
    },
    Rule {
        variant: Variant::VehicleMessage,
        description: "no field required by any other shape",
        matches: |o| !has_any(o, SIGNATURE),
    },
];

/// First rule matching `obj`, without logging.
pub(crate) fn resolve(obj: &Object) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(obj))
}

/// Infer the variant held by `obj`.
///
/// # Errors
///
/// Fails when no rule matches. That happens exactly when the object carries
/// part of some shape's required fields without completing any shape.
pub fn infer(obj: &Object) -> Result<Variant, UnrecognizedMessageType> {
    match resolve(obj) {
        Some(rule) => {
            debug!(target: "oxc.json", variant = %rule.variant, rule = rule.description, "inferred message shape");
            Ok(rule.variant)
        }
        None => {
            let fields: Vec<String> = obj.keys().cloned().collect();
            debug!(target: "oxc.json", ?fields, "no message shape matched");
            Err(Reason::NoMatchingShape { fields }.into())
        }
    }
}

/// Infer the variant held by an arbitrary JSON value.
///
/// # Errors
///
/// Fails when `value` is not an object or [`infer`] fails.
pub fn infer_value(value: &Value) -> Result<Variant, UnrecognizedMessageType> {
    let obj = value.as_object().ok_or_else(|| Reason::NotAnObject {
        found: json_type_name(value),
    })?;
    infer(obj)
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
