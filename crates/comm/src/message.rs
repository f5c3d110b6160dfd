//! Decoded inbound message.
//!
//! Frames are JSON objects whose `msg` field names the message kind; every
//! other field belongs to the payload:
//!
//! ```text
//! {"msg": "set_option", "name": "tile_font_size", "value": 16}
//!  ^^^^^^^^^^^^^^^^^^   ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//!  kind                 payload
//! ```
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{CommError, Result};

/// Field carrying the message kind.
pub const KIND_FIELD: &str = "msg";

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    kind: String,
    payload: Value,
}

impl Message {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Parse a raw JSON frame.
    ///
    /// # Errors
    ///
    /// - [`CommError::InvalidJson`] if the frame is not JSON
    /// - [`CommError::Malformed`] if it is not an object or lacks a string `msg`
    pub fn from_frame(frame: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(frame).map_err(CommError::InvalidJson)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(CommError::Malformed {
                    reason: format!("expected a JSON object, got {}", json_type(&other)),
                });
            }
        };

        let kind = match fields.remove(KIND_FIELD) {
            Some(Value::String(kind)) => kind,
            Some(other) => {
                return Err(CommError::Malformed {
                    reason: format!("'{KIND_FIELD}' must be a string, got {}", json_type(&other)),
                });
            }
            None => {
                return Err(CommError::Malformed {
                    reason: format!("missing '{KIND_FIELD}' field"),
                });
            }
        };

        Ok(Self {
            kind,
            payload: Value::Object(fields),
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Deserialize the payload into a handler-specific type.
    pub fn decode<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
