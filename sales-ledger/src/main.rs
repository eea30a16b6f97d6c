use dotenvy::dotenv;
use sales_ledger::config::get_configuration;
use sales_ledger::startup::{build_router, shutdown_signal};
use sales_ledger::AppState;
use service_core::observability::{init_metrics, init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "sales-ledger",
        &configuration.observability.log_level,
        configuration.observability.otlp_endpoint.as_deref(),
    )?;
    init_metrics()?;

    let catalog = configuration.ledger.catalog().map_err(|e| {
        tracing::error!("Invalid ledger catalog: {}", e);
        anyhow::anyhow!("Invalid ledger catalog: {}", e)
    })?;
    info!(
        items = catalog.items().len(),
        price_per_unit = %catalog.price_per_unit(),
        "Loaded catalog"
    );

    let app = build_router(AppState::new(catalog), &configuration.session);

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting sales-ledger on {}", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            anyhow::anyhow!("Server error: {}", e)
        })?;

    Ok(())
}
