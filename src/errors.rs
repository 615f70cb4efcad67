use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::codec::DecodeError;

/// The inbound request did not match what the scenario expects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConformanceError {
    #[error("header mismatch: {0}")]
    HeaderMismatch(String),
    #[error("body mismatch")]
    BodyMismatch,
}

/// Failures local to the harness.
///
/// These are rendered as plain text and never as an `{"error": ...}` envelope,
/// so a client cannot mistake a broken fixture for a structured callable error.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Conformance(#[from] ConformanceError),
}

impl HarnessError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownScenario(_) => StatusCode::NOT_FOUND,
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Conformance(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HarnessError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Conformance(err) => {
                tracing::warn!(error = %err, "request does not match scenario");
            }
            Self::Decode(err) => tracing::warn!(error = %err, "request body rejected"),
            Self::UnknownScenario(name) => tracing::debug!(scenario = %name, "no such scenario"),
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header;

    use super::*;

    #[test]
    fn conformance_errors_are_server_errors() {
        let err = HarnessError::from(ConformanceError::HeaderMismatch("Authorization".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "header mismatch: Authorization");
    }

    #[test]
    fn harness_errors_are_plain_text() {
        let response = HarnessError::from(ConformanceError::BodyMismatch).into_response();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/plain"));
    }
}
