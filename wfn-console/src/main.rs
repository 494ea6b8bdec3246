use dotenvy::dotenv;
use tracing::info;
use wfn_console::config::get_configuration;
use wfn_console::startup::build_router;
use wfn_console::AppState;
use wfn_core::observability::init_tracing;
use wfn_core::ApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "wfn-console",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    );

    if let Err(e) = wfn_console::services::metrics::init_metrics() {
        tracing::error!("Failed to register metrics: {}", e);
    }

    let api = ApiClient::new(&configuration.api).map_err(|e| {
        tracing::error!("Failed to build backend client: {}", e);
        anyhow::anyhow!("Backend client error: {}", e)
    })?;

    let state = AppState::new(api, &configuration.session);
    let app = build_router(state, configuration.server.secure_cookies);

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!(backend = %configuration.api.base_url, "Starting wfn-console on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
