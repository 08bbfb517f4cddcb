use super::handlers;
use axum::{routing::get, Router};

pub fn realtime_routes() -> Router {
    Router::new().route("/ws", get(handlers::websocket::websocket_handler))
}
