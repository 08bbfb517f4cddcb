// Request body extraction shared by the JSON handlers

use super::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, HeaderMap},
    Json,
};
use serde_json::Value;

/// A JSON body that may be left out.
///
/// A missing body, a blank body or a non-JSON content type yields `None`.
/// A JSON body that does not parse is rejected with 400 instead of being
/// treated as absent.
#[derive(Debug)]
pub struct OptionalJson(pub Option<Value>);

#[async_trait]
impl<S> FromRequest<S> for OptionalJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(None));
        }

        let Json(value) = Json::<Value>::from_bytes(&bytes).map_err(malformed_body)?;
        Ok(OptionalJson(Some(value)))
    }
}

fn malformed_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("Malformed JSON body: {}", rejection.body_text()))
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
