use std::sync::Arc;

use axum::{
    middleware,
    routing::{any, get},
    Router,
};

pub mod codec;
pub mod config;
pub mod errors;
pub mod harness;
pub mod http;
pub mod logging;

use harness::ScenarioTable;

#[derive(Clone)]
pub struct AppState {
    pub scenarios: Arc<ScenarioTable>,
}

impl AppState {
    pub fn new(scenarios: ScenarioTable) -> Self {
        Self {
            scenarios: Arc::new(scenarios),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/callable", get(http::handlers::discovery))
        .route("/{name}", any(http::handlers::callable_endpoint))
        .route(
            "/{project}/{region}/{name}",
            any(http::handlers::emulator_callable_endpoint),
        )
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
