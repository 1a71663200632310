use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::errors::ApiError;
use crate::config::AppConfig;

/// Logs every 500 response body and, in production, hides it behind the
/// configured internal error message.
pub async fn mask_internal_errors(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read internal error body");
            Bytes::new()
        });

    tracing::error!(
        component = "internal error middleware",
        status = parts.status.as_u16(),
        body = %String::from_utf8_lossy(&bytes),
        "internal server error"
    );

    if config.production {
        ApiError::internal_server_error(config.internal_err_msg.clone()).into_response()
    } else {
        Response::from_parts(parts, Body::from(bytes))
    }
}
