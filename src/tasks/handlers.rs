use super::services::TasksService;
use super::validators::{parse_create_body, parse_update_body};
use crate::common::{ApiError, ApiResponse, AppState, OptionalJson};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Task CRUD Handlers
// ============================================================================

/// GET /tasks - All tasks
pub async fn list_tasks(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.read().await.store.pool()?;
    let tasks_service = TasksService::new(pool);

    let tasks = tasks_service.list_tasks(None).await?;

    Ok(Json(ApiResponse::new(tasks, "Tasks retrieved successfully")))
}

/// GET /tasks/:email - Tasks owned by an email
pub async fn list_tasks_by_email(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.read().await.store.pool()?;
    let tasks_service = TasksService::new(pool);

    let tasks = tasks_service.list_tasks(Some(&email)).await?;

    Ok(Json(ApiResponse::new(tasks, "Tasks retrieved successfully")))
}

/// POST /tasks - Create a task
pub async fn create_task(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    OptionalJson(body): OptionalJson,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_create_body(body)?;

    let pool = state.read().await.store.pool()?;
    let tasks_service = TasksService::new(pool);

    let task = tasks_service.create_task(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(task, "Task created successfully")),
    ))
}

/// PUT|PATCH /tasks/:id - Merge fields into a task
pub async fn update_task(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(task_id): Path<String>,
    OptionalJson(body): OptionalJson,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_update_body(body)?;

    let pool = state.read().await.store.pool()?;
    let tasks_service = TasksService::new(pool);

    let outcome = tasks_service.update_task(&task_id, request).await?;

    Ok(Json(ApiResponse::new(outcome, "Task updated successfully")))
}

/// DELETE /tasks/:id - Delete a task
pub async fn delete_task(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(task_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.read().await.store.pool()?;
    let tasks_service = TasksService::new(pool);

    let outcome = tasks_service.delete_task(&task_id).await?;

    Ok(Json(ApiResponse::new(outcome, "Task deleted successfully")))
}
