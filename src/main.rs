use callable_conformance::{build_app, config::Config, harness::ScenarioTable, logging, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(ScenarioTable::standard());
    let scenario_count = state.scenarios.len();
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        scenarios = scenario_count,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
