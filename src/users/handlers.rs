use super::models::{RegisterUserRequest, Registration};
use super::services::UsersService;
use crate::common::{ApiError, ApiResponse, AppState, OptionalJson, Validator};
use axum::{extract::Extension, response::IntoResponse, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

/// POST /users - Register a new user or return the existing one
pub async fn register_user(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    OptionalJson(body): OptionalJson,
) -> Result<impl IntoResponse, ApiError> {
    let request: RegisterUserRequest = match body {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| ApiError::BadRequest(format!("Invalid user payload: {}", e)))?,
        None => RegisterUserRequest::default(),
    };
    request.validate(&request).into_result()?;

    let email = request.email.as_deref().unwrap_or_default();
    let display_name = request.display_name.as_deref().unwrap_or_default();

    let pool = state.read().await.store.pool()?;
    let users_service = UsersService::new(pool);

    let response = match users_service.register_or_login(email, display_name).await? {
        Registration::Existing(user) => ApiResponse::new(user, "User logged in successfully"),
        Registration::Created(user) => ApiResponse::new(user, "User created successfully"),
    };

    Ok(Json(response))
}
