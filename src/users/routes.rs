use super::handlers;
use axum::{routing::post, Router};

pub fn users_routes() -> Router {
    Router::new().route("/users", post(handlers::register_user))
}
