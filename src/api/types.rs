//! API request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw body of a chat request.
///
/// Fields are untyped at the parsing stage so a missing or non-string field
/// can be reported by name instead of as a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub session_id: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

fn into_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Validated chat request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

impl ChatPayload {
    /// Check required fields, returning the names of any that are missing
    pub fn validate(self) -> Result<ChatRequest, Vec<&'static str>> {
        match (into_string(self.session_id), into_string(self.message)) {
            (Some(session_id), Some(message)) => Ok(ChatRequest {
                session_id,
                message,
            }),
            (session_id, message) => {
                let mut missing = Vec::new();
                if session_id.is_none() {
                    missing.push("session_id");
                }
                if message.is_none() {
                    missing.push("message");
                }
                Err(missing)
            }
        }
    }
}

/// Response for a single-shot chat reply
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub session_id: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<&'static str>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            missing_fields: Vec::new(),
        }
    }

    pub fn missing(fields: Vec<&'static str>) -> Self {
        Self {
            error: format!("Missing required field(s): {}", fields.join(", ")),
            missing_fields: fields,
        }
    }
}
