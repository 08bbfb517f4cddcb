use super::models::RegisterUserRequest;
use crate::common::{ValidationResult, Validator};
use regex::Regex;
use std::sync::OnceLock;

pub const INVALID_EMAIL_MESSAGE: &str = "Please use a valid email address";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"))
}

/// Basic `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

impl Validator<RegisterUserRequest> for RegisterUserRequest {
    fn validate(&self, data: &RegisterUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        let email = data.email.as_deref().map(str::trim).unwrap_or("");
        if email.is_empty() {
            result.add_error("email", "Email is required");
        } else if !is_valid_email(email) {
            result.add_error("email", INVALID_EMAIL_MESSAGE);
        }

        let display_name = data.display_name.as_deref().map(str::trim).unwrap_or("");
        if display_name.is_empty() {
            result.add_error("displayName", "Display name is required");
        }

        result
    }
}
