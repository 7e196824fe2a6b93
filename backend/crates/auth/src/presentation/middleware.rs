//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid session
///
/// On success the resolved [`AuthenticatedUser`](crate::application::AuthenticatedUser)
/// is stored in the request extensions; handlers read it from there.
/// Otherwise responds `401 {ok: false, error: "UNAUTHORIZED"}`.
pub async fn require_auth<C, S>(
    State(state): State<AuthAppState<C, S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.sessions.clone());
    let user = use_case.execute(token.as_deref()).await?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
