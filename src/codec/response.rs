//! Client-side interpretation of callable responses.
//!
//! A conformant client has to tell apart a value, an explicit `null`, an
//! absent result and the various error shapes. [`decode_response`] performs
//! that classification from nothing but the HTTP status and the raw body.

use thiserror::Error;

use super::envelope::is_empty_body;
use super::status::ErrorCode;
use super::value::{decode_value, Value};

const INVALID_RESPONSE_MESSAGE: &str = "Response is not valid JSON object.";

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{code}: {message}")]
pub struct CallableError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Value>,
}

impl CallableError {
    fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.as_str().to_string(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallableResult {
    /// The body carried a `data` key; `Value::Null` for `{"data":null}`.
    Data(Value),
    /// A successful response without any `data` key.
    MissingResult,
    Error(CallableError),
}

pub fn decode_response(http_status: u16, body: &[u8]) -> CallableResult {
    let parsed = serde_json::from_slice::<serde_json::Value>(body).ok();

    let mut error = CallableError::from_code(ErrorCode::from_http_status(http_status));
    if let Some(payload) = parsed
        .as_ref()
        .and_then(|json| json.get("error"))
        .and_then(serde_json::Value::as_object)
    {
        apply_error_payload(&mut error, payload);
    }

    if error.code != ErrorCode::Ok {
        return CallableResult::Error(error);
    }

    if is_empty_body(body) {
        return CallableResult::MissingResult;
    }

    let Some(serde_json::Value::Object(object)) = parsed else {
        return CallableResult::Error(CallableError {
            code: ErrorCode::Internal,
            message: INVALID_RESPONSE_MESSAGE.to_string(),
            details: None,
        });
    };

    match object.get("data") {
        Some(data) => CallableResult::Data(decode_value(data)),
        None => CallableResult::MissingResult,
    }
}

fn apply_error_payload(
    error: &mut CallableError,
    payload: &serde_json::Map<String, serde_json::Value>,
) {
    if let Some(status) = payload.get("status").and_then(serde_json::Value::as_str) {
        let code = ErrorCode::from_wire(status);
        if code == ErrorCode::Unknown {
            *error = CallableError::from_code(ErrorCode::Unknown);
            return;
        }

        error.code = code;
        error.message = code.as_str().to_string();
    }

    if let Some(message) = payload.get("message").and_then(serde_json::Value::as_str) {
        error.message = message.to_string();
    }

    error.details = payload.get("details").map(decode_value);
}
