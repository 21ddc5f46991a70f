use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use keystone_db::{Database, DatabaseConfig};
use keystone_server::config::ServerConfig;
use keystone_server::routes;
use keystone_server::state::AppState;

/// Auth payloads are tiny; anything larger is rejected before parsing.
const MAX_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("keystone=info".parse()?))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    db.migrate().await?;

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(db, &config)?);

    let app = routes::router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
