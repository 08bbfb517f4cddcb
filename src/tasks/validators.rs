use super::models::{
    CreateTaskRequest, TaskDescription, UpdateTaskRequest, MAX_DESCRIPTION_LENGTH,
    MAX_TITLE_LENGTH,
};
use crate::common::{ApiError, ValidationResult, Validator};
use serde_json::Value;

pub const TASK_REQUIRED_MESSAGE: &str = "Task are required";

/// Accept a create body only when it carries at least one field
pub fn parse_create_body(body: Option<Value>) -> Result<CreateTaskRequest, ApiError> {
    match body {
        None | Some(Value::Null) => Err(ApiError::BadRequest(TASK_REQUIRED_MESSAGE.to_string())),
        Some(Value::Object(map)) if map.is_empty() => {
            Err(ApiError::BadRequest(TASK_REQUIRED_MESSAGE.to_string()))
        }
        Some(value) => serde_json::from_value(value)
            .map_err(|e| ApiError::BadRequest(format!("Invalid task payload: {}", e))),
    }
}

pub fn parse_update_body(body: Option<Value>) -> Result<UpdateTaskRequest, ApiError> {
    match body {
        None | Some(Value::Null) => Ok(UpdateTaskRequest::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| ApiError::BadRequest(format!("Invalid task payload: {}", e))),
    }
}

fn check_title(result: &mut ValidationResult, title: &str) {
    if title.trim().is_empty() {
        result.add_error("title", "Title is required");
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        result.add_error("title", "Title must not exceed 50 characters");
    }
}

fn check_description(result: &mut ValidationResult, description: &TaskDescription) {
    if let TaskDescription::Text(text) = description {
        if text.chars().count() > MAX_DESCRIPTION_LENGTH {
            result.add_error("description", "Description must not exceed 200 characters");
        }
    }
}

fn check_required(result: &mut ValidationResult, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        result.add_error(field, message);
    }
}

impl Validator<CreateTaskRequest> for CreateTaskRequest {
    fn validate(&self, data: &CreateTaskRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        check_title(&mut result, data.title.as_deref().unwrap_or(""));
        if let Some(description) = &data.description {
            check_description(&mut result, description);
        }
        check_required(
            &mut result,
            "category",
            data.category.as_deref().unwrap_or(""),
            "Category is required",
        );
        check_required(
            &mut result,
            "email",
            data.email.as_deref().unwrap_or(""),
            "Email is required",
        );

        result
    }
}

impl Validator<UpdateTaskRequest> for UpdateTaskRequest {
    fn validate(&self, data: &UpdateTaskRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            check_title(&mut result, title);
        }
        if let Some(Some(description)) = &data.description {
            check_description(&mut result, description);
        }
        if let Some(category) = &data.category {
            check_required(&mut result, "category", category, "Category cannot be empty");
        }
        if let Some(email) = &data.email {
            check_required(&mut result, "email", email, "Email cannot be empty");
        }

        result
    }
}
