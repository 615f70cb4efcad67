//! Axum HTTP handlers for the web server
//!
//! Provides the per-scenario callable endpoints, and general metadata endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    Json,
};
use serde::Serialize;

use crate::errors::HarnessError;
use crate::harness::conformance::respond;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub scenarios: Vec<&'static str>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery(State(state): State<AppState>) -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        scenarios: state.scenarios.names().collect(),
    })
}

pub async fn callable_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HarnessError> {
    invoke(&state, &name, &headers, &body)
}

/// Emulator-style route; project and region only namespace the function name.
pub async fn emulator_callable_endpoint(
    State(state): State<AppState>,
    Path((_project, _region, name)): Path<(String, String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HarnessError> {
    invoke(&state, &name, &headers, &body)
}

fn invoke(
    state: &AppState,
    name: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, HarnessError> {
    let scenario = state
        .scenarios
        .get(name)
        .ok_or_else(|| HarnessError::UnknownScenario(name.to_string()))?;

    respond(scenario, headers, body)
}
