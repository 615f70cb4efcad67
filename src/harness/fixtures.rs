//! The fixed scenario set served to SDK integration tests.

use axum::http::StatusCode;

use super::scenario::{Outcome, Scenario, ScenarioTable};
use crate::codec::{
    ErrorCode, ErrorPayload, Int64Wrapper, Mapping, RequestEnvelope, ResponseEnvelope, Value,
};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const INSTANCE_ID_HEADER: &str = "Firebase-Instance-ID-Token";

impl ScenarioTable {
    pub fn standard() -> Self {
        Self::new([
            data_test(),
            scalar_test(),
            token_test(),
            instance_id_test(),
            null_test(),
            missing_result_test(),
            unhandled_error_test(),
            unknown_error_test(),
            explicit_error_test(),
            http_error_test(),
        ])
    }
}

fn empty_object() -> Value {
    Value::Object(Mapping::new())
}

fn data_test() -> Scenario {
    let request = Value::object([
        ("bool", Value::from(true)),
        ("int", Value::from(2)),
        ("long", Value::from(Int64Wrapper::new(3))),
        ("string", Value::from("four")),
        ("array", Value::from(vec![5, 6])),
        ("null", Value::Null),
    ]);
    let response = Value::object([
        ("message", Value::from("stub response")),
        ("code", Value::from(42)),
        ("long", Value::from(Int64Wrapper::new(420))),
    ]);

    Scenario::new("dataTest", Outcome::Success(ResponseEnvelope::Data(response)))
        .expect_request(RequestEnvelope::new(request))
}

fn scalar_test() -> Scenario {
    Scenario::new(
        "scalarTest",
        Outcome::Success(ResponseEnvelope::Data(Value::from(76))),
    )
    .expect_request(RequestEnvelope::new(17))
}

fn token_test() -> Scenario {
    Scenario::new(
        "tokenTest",
        Outcome::Success(ResponseEnvelope::Data(empty_object())),
    )
    .expect_header(AUTHORIZATION_HEADER, "Bearer token")
    .expect_request(RequestEnvelope::new(empty_object()))
}

fn instance_id_test() -> Scenario {
    Scenario::new(
        "instanceIdTest",
        Outcome::Success(ResponseEnvelope::Data(empty_object())),
    )
    .expect_header(INSTANCE_ID_HEADER, "iid")
    .expect_request(RequestEnvelope::new(empty_object()))
}

fn null_test() -> Scenario {
    Scenario::new(
        "nullTest",
        Outcome::Success(ResponseEnvelope::Data(Value::Null)),
    )
    .expect_request(RequestEnvelope::new(Value::Null))
}

fn missing_result_test() -> Scenario {
    Scenario::new("missingResultTest", Outcome::EmptyBody)
        .expect_request(RequestEnvelope::new(Value::Null))
}

fn unhandled_error_test() -> Scenario {
    Scenario::new("unhandledErrorTest", Outcome::Crash)
}

fn unknown_error_test() -> Scenario {
    Scenario::new(
        "unknownErrorTest",
        Outcome::HttpStatusError(
            StatusCode::BAD_REQUEST,
            Some(ErrorPayload::with_raw_status(
                "THIS_IS_NOT_VALID",
                "this should be ignored",
            )),
        ),
    )
}

fn explicit_error_test() -> Scenario {
    let details = Value::object([
        ("start", Value::from(10)),
        ("end", Value::from(20)),
        ("long", Value::from(Int64Wrapper::new(30))),
    ]);

    Scenario::new(
        "explicitErrorTest",
        Outcome::HttpStatusError(
            StatusCode::BAD_REQUEST,
            Some(ErrorPayload::new(ErrorCode::OutOfRange, "explicit nope").with_details(details)),
        ),
    )
}

fn http_error_test() -> Scenario {
    Scenario::new(
        "httpErrorTest",
        Outcome::HttpStatusError(StatusCode::BAD_REQUEST, None),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_registers_every_scenario() {
        let table = ScenarioTable::standard();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(
            names,
            [
                "dataTest",
                "explicitErrorTest",
                "httpErrorTest",
                "instanceIdTest",
                "missingResultTest",
                "nullTest",
                "scalarTest",
                "tokenTest",
                "unhandledErrorTest",
                "unknownErrorTest",
            ]
        );
    }

    #[test]
    fn error_scenarios_accept_any_request() {
        let table = ScenarioTable::standard();
        for name in [
            "unhandledErrorTest",
            "unknownErrorTest",
            "explicitErrorTest",
            "httpErrorTest",
        ] {
            let scenario = table.get(name).expect("scenario registered");
            assert!(scenario.request.is_none(), "{name} should accept any body");
            assert!(scenario.headers.is_empty());
        }
    }

    #[test]
    fn null_and_missing_result_differ_only_in_outcome() {
        let table = ScenarioTable::standard();
        let null = table.get("nullTest").expect("scenario registered");
        let missing = table.get("missingResultTest").expect("scenario registered");

        assert_eq!(null.request, missing.request);
        assert_ne!(null.outcome, missing.outcome);
    }
}
