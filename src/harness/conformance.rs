//! Request validation and outcome rendering for a single scenario invocation.

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::scenario::{Outcome, Scenario};
use crate::codec::{
    decode_slice, is_empty_body, values_equal, RequestEnvelope, ResponseEnvelope, Value,
};
use crate::errors::{ConformanceError, HarnessError};

pub fn check_headers(scenario: &Scenario, headers: &HeaderMap) -> Result<(), ConformanceError> {
    for (name, expected) in &scenario.headers {
        let matches = headers
            .get(*name)
            .is_some_and(|actual| actual.as_bytes() == expected.as_bytes());
        if !matches {
            return Err(ConformanceError::HeaderMismatch((*name).to_string()));
        }
    }

    Ok(())
}

/// Decodes a request body, treating an empty body as `{"data": null}`.
pub fn decode_request_body(body: &[u8]) -> Result<Value, HarnessError> {
    if is_empty_body(body) {
        return Ok(RequestEnvelope::new(Value::Null).to_value());
    }

    Ok(decode_slice(body)?)
}

pub fn check_body(scenario: &Scenario, body: &[u8]) -> Result<(), HarnessError> {
    let Some(expected) = &scenario.request else {
        return Ok(());
    };

    let actual = decode_request_body(body)?;
    if !values_equal(&actual, &expected.to_value()) {
        tracing::debug!(
            scenario = scenario.name,
            expected = %expected.to_json(),
            actual = %actual,
            "body differs from expected envelope"
        );
        return Err(ConformanceError::BodyMismatch.into());
    }

    Ok(())
}

/// Validates the request and produces the scenario's fixed response.
///
/// Panics for [`Outcome::Crash`]; the caller's connection is torn down without
/// a response.
pub fn respond(
    scenario: &Scenario,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, HarnessError> {
    check_headers(scenario, headers)?;
    check_body(scenario, body)?;

    tracing::debug!(
        scenario = scenario.name,
        outcome = scenario.outcome.kind(),
        "scenario matched"
    );

    Ok(render(scenario.name, &scenario.outcome))
}

fn render(name: &str, outcome: &Outcome) -> Response {
    match outcome {
        Outcome::Success(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Outcome::EmptyBody => (StatusCode::OK, Json(json!({}))).into_response(),
        Outcome::HttpStatusError(status, Some(payload)) => {
            (*status, Json(ResponseEnvelope::Error(payload.clone()))).into_response()
        }
        Outcome::HttpStatusError(status, None) => (*status).into_response(),
        Outcome::Crash => {
            tracing::error!(scenario = name, "aborting request without a response");
            panic!("unhandled error in scenario {name}");
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::harness::ScenarioTable;

    fn scenario(name: &str) -> Scenario {
        ScenarioTable::standard()
            .get(name)
            .cloned()
            .expect("scenario registered")
    }

    #[test]
    fn missing_header_is_reported_by_name() {
        let err = check_headers(&scenario("tokenTest"), &HeaderMap::new())
            .expect_err("expected header mismatch");
        assert_eq!(err, ConformanceError::HeaderMismatch("Authorization".into()));
    }

    #[test]
    fn header_values_match_case_sensitively() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("bearer token"));
        assert!(check_headers(&scenario("tokenTest"), &headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer token"));
        assert!(check_headers(&scenario("tokenTest"), &headers).is_ok());
    }

    #[test]
    fn empty_body_reads_as_null_data() {
        assert!(check_body(&scenario("nullTest"), b"").is_ok());
        assert!(check_body(&scenario("missingResultTest"), b"  \n").is_ok());
    }

    #[test]
    fn keyless_body_is_not_null_data() {
        let err = check_body(&scenario("nullTest"), b"{}").expect_err("expected mismatch");
        assert!(matches!(
            err,
            HarnessError::Conformance(ConformanceError::BodyMismatch)
        ));
    }

    #[test]
    fn data_body_matches_in_any_key_order() {
        let body = br#"{"data":{"null":null,"array":[5,6],"string":"four","long":{"@type":"type.googleapis.com/google.protobuf.Int64Value","value":"3"},"int":2,"bool":true}}"#;
        assert!(check_body(&scenario("dataTest"), body).is_ok());
    }

    #[test]
    fn plain_number_does_not_match_int64() {
        let body = br#"{"data":{"bool":true,"int":2,"long":3,"string":"four","array":[5,6],"null":null}}"#;
        assert!(check_body(&scenario("dataTest"), body).is_err());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = check_body(&scenario("scalarTest"), b"{\"data\":").expect_err("expected error");
        assert!(matches!(err, HarnessError::Decode(_)));
    }

    #[test]
    fn any_request_scenarios_skip_body_decoding() {
        assert!(check_body(&scenario("httpErrorTest"), b"not json").is_ok());
    }

    #[test]
    #[should_panic(expected = "unhandled error in scenario unhandledErrorTest")]
    fn crash_outcome_panics() {
        let _ = respond(&scenario("unhandledErrorTest"), &HeaderMap::new(), b"");
    }
}
