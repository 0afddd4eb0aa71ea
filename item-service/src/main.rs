use item_service::config::ItemConfig;
use item_service::services::init_metrics;
use item_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT")
        .ok()
        .filter(|s| !s.is_empty());
    init_tracing("item-service", "info", otlp_endpoint.as_deref());

    let config = ItemConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start item-service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
