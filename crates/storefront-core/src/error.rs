//! Failure envelope shared by every service error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Render a failure as `{"success": false, "kind": .., "message": ..}`.
///
/// Service error enums call this from their `IntoResponse` impl so that every
/// failure on the wire has the same shape.
pub fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "success": false,
        "kind": kind,
        "message": message,
    });
    (status, axum::Json(body)).into_response()
}
