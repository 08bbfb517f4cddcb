// src/main.rs
use dotenv::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod app;
mod common;
mod logging_middleware;
mod notifications;
mod realtime;
mod tasks;
mod users;

use common::{AppConfig, AppState, Store};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();
    config.log_summary();

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    // A failed connection is not fatal: HTTP keeps serving and store
    // operations report the missing connection
    let store = match Store::connect(config.database_uri.as_deref(), config.reset_db).await {
        Ok(store) => {
            info!("Database connected");
            store
        }
        Err(e) => {
            error!(error = %e, "Database connection failed; store operations will fail");
            Store::disconnected()
        }
    };
    info!(connected = store.is_connected(), "Store initialized");

    let app_state = AppState {
        store: store.clone(),
    };
    let shared = Arc::new(RwLock::new(app_state));

    let app = app::build_router(shared, &config);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on port: {}", config.port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
