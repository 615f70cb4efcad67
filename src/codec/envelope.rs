//! Request and response envelopes of the callable protocol.

use serde::Serialize;
use serde_json::json;

use super::status::ErrorCode;
use super::value::{encode_value, Value};

/// Whether a raw body counts as absent: empty or ASCII whitespace only.
pub fn is_empty_body(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

/// `{"data": <value>}` sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    pub data: Value,
}

impl RequestEnvelope {
    pub fn new(data: impl Into<Value>) -> Self {
        Self { data: data.into() }
    }

    /// The envelope as a value, for comparison against a decoded body.
    pub fn to_value(&self) -> Value {
        Value::object([("data", self.data.clone())])
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "data": encode_value(&self.data) })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorPayload {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_raw_status(code.as_str(), message)
    }

    /// Builds a payload whose status is sent verbatim, canonical or not.
    pub fn with_raw_status(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::from_wire(&self.status)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("status".to_string(), json!(self.status));
        object.insert("message".to_string(), json!(self.message));
        if let Some(details) = &self.details {
            object.insert("details".to_string(), encode_value(details));
        }
        serde_json::Value::Object(object)
    }
}

/// `{"data": ...}` on success, `{"error": ...}` on failure; never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseEnvelope {
    Data(Value),
    Error(ErrorPayload),
}

impl ResponseEnvelope {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Data(value) => json!({ "data": encode_value(value) }),
            Self::Error(payload) => json!({ "error": payload.to_json() }),
        }
    }
}
