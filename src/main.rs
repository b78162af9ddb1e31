//! hook-gateway server entry point.
//!
//! Starts the Axum HTTP server with the hook registration endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hook_gateway::api;
use hook_gateway::app_state::AppState;
use hook_gateway::config::GatewayConfig;
use hook_gateway::domain::EventBus;
use hook_gateway::persistence::{HookStore, InMemoryHookStore, PostgresHookStore};
use hook_gateway::service::HookService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(addr = %config.listen_addr, "starting hook-gateway");

    // Build the store
    let store: Arc<dyn HookStore> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("using postgres hook store");
        Arc::new(PostgresHookStore::new(pool))
    } else {
        tracing::warn!("persistence disabled; hooks will not survive a restart");
        Arc::new(InMemoryHookStore::new())
    };

    // Build domain and service layers
    let event_bus = EventBus::new(config.event_bus_capacity);
    let hook_service = Arc::new(HookService::new(
        store,
        event_bus.clone(),
        config.max_hook_count,
    ));

    // Build application state
    let app_state = AppState {
        hook_service,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
