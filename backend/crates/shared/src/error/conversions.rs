//! Error conversions
//!
//! HTTP response envelope for [`AppError`] when the `axum` feature is enabled.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// Failure envelope: `{"ok": false, "error": "<CODE>"}`
///
/// The message never leaves the server; only the code is returned.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "ok": false,
            "error": self.code(),
        });

        (status, Json(body)).into_response()
    }
}
