use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = elapsed_ms,
        "request summary"
    );

    if status.is_server_error() {
        warn!(
            method = %method,
            scenario = scenario_from_path(&path),
            status = status.as_u16(),
            "request did not conform to its scenario"
        );
    }

    response
}

/// Scenario name addressed by a callable route, i.e. the last path segment.
pub fn scenario_from_path(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::scenario_from_path;

    #[test]
    fn scenario_is_last_path_segment() {
        assert_eq!(scenario_from_path("/tokenTest"), "tokenTest");
        assert_eq!(
            scenario_from_path("/functions-integration-test/us-central1/dataTest"),
            "dataTest"
        );
        assert_eq!(scenario_from_path("/nullTest/"), "nullTest");
        assert_eq!(scenario_from_path("/"), "");
    }
}
