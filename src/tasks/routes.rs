use super::handlers;
use axum::{routing::get, Router};

/// Creates the tasks router
pub fn tasks_routes() -> Router {
    Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        // The single path segment is an owner email on GET and a task id otherwise
        .route(
            "/tasks/:key",
            get(handlers::list_tasks_by_email)
                .put(handlers::update_task)
                .patch(handlers::update_task)
                .delete(handlers::delete_task),
        )
}
