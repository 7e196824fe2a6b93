//! HTTP Handlers

use axum::body::Bytes;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticatedUser, CredentialVerifier, SessionManager, SignInInput, SignInUseCase,
    SignOutUseCase,
};
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, OkResponse, UserResponse};

/// Shared state for auth handlers
pub struct AuthAppState<C, S>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub verifier: Arc<CredentialVerifier<C>>,
    pub sessions: Arc<SessionManager<S>>,
    pub config: Arc<AuthConfig>,
}

impl<C, S> AuthAppState<C, S>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(credential_repo: C, sessions: Arc<SessionManager<S>>, config: AuthConfig) -> Self {
        Self {
            verifier: Arc::new(CredentialVerifier::new(credential_repo)),
            sessions,
            config: Arc::new(config),
        }
    }
}

impl<C, S> Clone for AuthAppState<C, S>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            verifier: self.verifier.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<C, S>(
    State(state): State<AuthAppState<C, S>>,
    headers: HeaderMap,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let req = LoginRequest::from_request(&headers, &body)?;

    let use_case = SignInUseCase::new(state.verifier.clone(), state.sessions.clone());

    let output = use_case
        .execute(SignInInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    let cookie = build_session_cookie(&state.config, output.session_token.as_str())?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::new(output.username)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/logout
///
/// Always succeeds and always clears the cookie.
pub async fn logout<C, S>(
    State(state): State<AuthAppState<C, S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = SignOutUseCase::new(state.sessions.clone());
    // Ignore errors - just clear the cookie
    if let Err(e) = use_case.execute(token.as_deref()).await {
        tracing::warn!(error = %e, "Failed to revoke session on sign out");
    }

    let cookie = build_clear_cookie(&state.config)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(OkResponse::ok()),
    ))
}

// ============================================================================
// Current User (behind `require_auth`)
// ============================================================================

/// GET /api/me
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<UserResponse> {
    Json(UserResponse::new(user.username))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn build_session_cookie(config: &AuthConfig, token: &str) -> AuthResult<HeaderValue> {
    config
        .session_cookie()
        .set_cookie_header(token)
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))
}

fn build_clear_cookie(config: &AuthConfig) -> AuthResult<HeaderValue> {
    config
        .session_cookie()
        .delete_cookie_header()
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))
}
