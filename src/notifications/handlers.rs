use super::services::NotificationsService;
use crate::common::{ApiError, ApiResponse, AppState};
use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /notifications/:email - Notifications for an owner, newest first
pub async fn list_notifications(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.read().await.store.pool()?;
    let notifications_service = NotificationsService::new(pool);

    let notifications = notifications_service.list_for_email(&email).await?;

    Ok(Json(ApiResponse::new(
        notifications,
        "Notifications retrieved successfully",
    )))
}
