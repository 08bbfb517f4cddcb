// src/common/store.rs
//! Store handle: owns the database pool and its lifecycle.
//!
//! The handle is built once at startup and injected into `AppState`. When the
//! connection string is missing or the connection fails, the server keeps
//! serving HTTP with a disconnected handle, and every store operation fails.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::error::ApiError;
use super::migrations;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database connection string is not configured (set DB_URI)")]
    MissingUri,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct Store {
    pool: Option<SqlitePool>,
}

impl Store {
    /// Connect to the database and make sure the schema exists
    pub async fn connect(uri: Option<&str>, reset: bool) -> Result<Self, StoreError> {
        let uri = uri.ok_or(StoreError::MissingUri)?;

        ensure_parent_dir(uri).await?;

        let connect_options = SqliteConnectOptions::from_str(uri)?.create_if_missing(true);
        // every connection to ":memory:" opens its own empty database
        let max_connections = if uri.contains(":memory:") { 1 } else { 10 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(connect_options)
            .await?;

        migrations::run_migrations(&pool, reset).await?;

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool: Some(pool) }
    }

    /// A handle with no connection behind it
    pub fn disconnected() -> Self {
        Self { pool: None }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.is_some()
    }

    /// Pool for a single operation; fails when the store never connected
    pub fn pool(&self) -> Result<SqlitePool, ApiError> {
        self.pool.clone().ok_or_else(|| {
            ApiError::StoreUnavailable("database connection is not established".to_string())
        })
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}

/// Create the directory holding a file-backed SQLite database
async fn ensure_parent_dir(uri: &str) -> Result<(), std::io::Error> {
    if let Some(path_part) = uri.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }
    Ok(())
}
