use axum::Json;
use serde::Serialize;

use crate::api::errors::ApiError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Liveness probe
///
/// GET /ping
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /hello
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "world".to_string(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("resource not found")
}

/// Fallback for known routes hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("method not allowed")
}
