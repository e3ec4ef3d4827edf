// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wire field names, shared by every message shape.
#![allow(missing_docs)]

pub const TIMESTAMP: &str = "timestamp";

pub const ID: &str = "id";
pub const BUS: &str = "bus";
pub const PAYLOAD: &str = "payload";

pub const MODE: &str = "mode";
pub const PID: &str = "pid";
pub const MULTIPLE_RESPONSES: &str = "multiple_responses";
pub const FREQUENCY: &str = "frequency";
pub const SUCCESS: &str = "success";
pub const NEGATIVE_RESPONSE_CODE: &str = "negative_response_code";

pub const COMMAND_NAME: &str = "command_name";
pub const ACTION: &str = "action";
pub const ENABLED: &str = "enabled";
pub const BYPASS: &str = "bypass";
pub const FORMAT: &str = "format";

pub const COMMAND_RESPONSE: &str = "command_response";
pub const MESSAGE: &str = "message";
pub const STATUS: &str = "status";

pub const NAME: &str = "name";
pub const VALUE: &str = "value";
pub const EVENT: &str = "event";

/// Every field that is required by at least one concrete shape.
///
/// An object carrying any of these cannot fall back to the generic message.
pub const SIGNATURE: &[&str] = &[
    ID,
    BUS,
    PAYLOAD,
    MODE,
    PID,
    SUCCESS,
    COMMAND_RESPONSE,
    COMMAND_NAME,
    NAME,
    VALUE,
    EVENT,
];
