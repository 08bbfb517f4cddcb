// src/app.rs
//! Router composition shared by the binary and the router-level tests

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::common::{AppConfig, AppState};
use crate::{logging_middleware, notifications, realtime, tasks, users};

pub const ROOT_PLACEHOLDER: &str = "Track-task on coming soon....";

/// GET / - Plain-text placeholder
async fn root() -> &'static str {
    ROOT_PLACEHOLDER
}

pub fn build_router(shared: Arc<RwLock<AppState>>, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(users::users_routes())
        .merge(tasks::tasks_routes())
        .merge(notifications::notifications_routes())
        .merge(realtime::realtime_routes())
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Any origin unless CORS_ORIGINS narrows it down
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match &config.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(origins)
        }
        None => layer.allow_origin(Any),
    }
}
