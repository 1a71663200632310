use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::api::errors::ApiError;

/// Turns a handler panic into a 500 `ApiError`
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`. Layer it
/// inside `mask_internal_errors` so production hides the panic message.
pub fn recover_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(
        component = "recovery middleware",
        error = %detail,
        "Recovery middleware catch an error"
    );

    ApiError::internal_server_error(detail).into_response()
}
