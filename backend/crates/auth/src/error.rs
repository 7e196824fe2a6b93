//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::crypto::EntropyError;
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body missing, not JSON, or fields not strings
    #[error("Invalid input")]
    InvalidInput,

    /// Unknown username or wrong password; the two are not distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session missing, unknown or expired
    #[error("Unauthorized")]
    Unauthorized,

    /// OS randomness unavailable
    #[error("Entropy error: {0}")]
    Entropy(#[from] EntropyError),

    /// Password hashing task panicked or was cancelled
    #[error("Password hashing task failed")]
    Task(#[from] tokio::task::JoinError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Entropy(_) | AuthError::Task(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Entropy(_) | AuthError::Task(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Machine-readable code returned in the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidInput => "INVALID_INPUT",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::Entropy(_) | AuthError::Task(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError.code()
            }
        }
    }

    /// Convert to AppError, keeping the underlying cause as its source
    pub fn into_app_error(self) -> AppError {
        let app_error = AppError::new(self.kind(), self.to_string()).with_code(self.code());
        match self {
            AuthError::Entropy(e) => app_error.with_source(e),
            AuthError::Task(e) => app_error.with_source(e),
            _ => app_error,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let invalid_credentials = matches!(self, AuthError::InvalidCredentials);
        let app_error = self.into_app_error();

        if app_error.kind().is_server_error() {
            tracing::error!(error = ?app_error, kind = %app_error.kind(), "Auth request failed");
        } else if invalid_credentials {
            tracing::warn!("Invalid login attempt");
        } else {
            tracing::debug!(error = %app_error, "Auth error");
        }

        app_error.into_response()
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::Entropy(e) => AuthError::Entropy(e),
            other => AuthError::Internal(other.to_string()),
        }
    }
}
