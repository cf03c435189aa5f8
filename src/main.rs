//! seat-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use seat_gateway::api;
use seat_gateway::app_state::AppState;
use seat_gateway::config::{LogFormat, ServiceConfig};
use seat_gateway::domain::ChangeBus;
use seat_gateway::service::EventService;
use seat_gateway::store::{EventStore, InMemoryEventStore, PostgresEventStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting seat-gateway");

    // Build storage layer
    let store: Arc<dyn EventStore> = if config.persistence_enabled {
        let store = PostgresEventStore::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        store.migrate().await.context("running migrations")?;
        tracing::info!("using PostgreSQL event store");
        Arc::new(store)
    } else {
        tracing::info!("using in-memory event store");
        Arc::new(InMemoryEventStore::new())
    };

    // Build service layer
    let change_bus = ChangeBus::new(config.change_bus_capacity);
    let event_service = EventService::new(store, change_bus);

    // Build router
    let app = api::build_app(AppState::new(event_service), config.request_timeout());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C so in-flight requests can finish.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
