// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod extract;
pub mod helpers;
pub mod id_generator;
pub mod migrations;
pub mod response;
pub mod state;
pub mod store;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::ApiError;
pub use extract::OptionalJson;
pub use helpers::{normalize_email, now_iso8601, safe_email_log};
pub use id_generator::*;
pub use response::ApiResponse;
pub use state::AppState;
pub use store::Store;
pub use validation::{ValidationResult, Validator};
