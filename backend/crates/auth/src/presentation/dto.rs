//! API DTOs (Data Transfer Objects)

use axum::http::{HeaderMap, header};
use platform::password::ClearTextPassword;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Login
// ============================================================================

/// Login request
///
/// Decoded by hand rather than through `Json<T>`: a body that is not JSON,
/// not an object, or whose `username`/`password` are missing or not strings
/// must all surface as `INVALID_INPUT`, as must any `Content-Type` other
/// than `application/json`.
#[derive(Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: ClearTextPassword,
}

impl LoginRequest {
    /// Decode a request, checking its `Content-Type` first
    pub fn from_request(headers: &HeaderMap, body: &[u8]) -> AuthResult<Self> {
        if !is_json_content_type(headers) {
            return Err(AuthError::InvalidInput);
        }
        Self::from_json(body)
    }

    pub fn from_json(body: &[u8]) -> AuthResult<Self> {
        let mut value: Value = serde_json::from_slice(body).map_err(|_| AuthError::InvalidInput)?;

        let username = take_string(&mut value, "username")?;
        let password = take_string(&mut value, "password")?;

        Ok(Self {
            username,
            password: ClearTextPassword::new(password),
        })
    }
}

/// `application/json`, optionally followed by parameters such as `charset`
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn take_string(value: &mut Value, field: &str) -> AuthResult<String> {
    match value.get_mut(field).map(Value::take) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(AuthError::InvalidInput),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of the signed-in user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub username: String,
}

/// `{ok: true, user: {username}}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub ok: bool,
    pub user: UserView,
}

impl UserResponse {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            ok: true,
            user: UserView {
                username: username.into(),
            },
        }
    }
}

/// `{ok: true}`
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
