use super::handlers;
use axum::{routing::get, Router};

pub fn notifications_routes() -> Router {
    Router::new().route(
        "/notifications/:email",
        get(handlers::list_notifications),
    )
}
