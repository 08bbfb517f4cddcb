// src/common/config.rs
//! Runtime configuration read from the environment (after `.env` is loaded)

use std::env;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string. `None` means no store will be connected.
    pub database_uri: Option<String>,
    pub port: u16,
    /// Allowed CORS origins; `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    /// Drop and recreate all tables at startup
    pub reset_db: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_uri = lookup("DB_URI")
            .or_else(|| lookup("DATABASE_URL"))
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid PORT, falling back to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty());

        let reset_db = lookup("RESET_DB")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            database_uri,
            port,
            cors_origins,
            reset_db,
        }
    }

    /// Log the effective configuration without leaking the connection string
    pub fn log_summary(&self) {
        info!(
            port = self.port,
            database_configured = self.database_uri.is_some(),
            cors = ?self.cors_origins,
            reset_db = self.reset_db,
            "Configuration loaded"
        );
    }
}
