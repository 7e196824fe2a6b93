//! Check Session Use Case
//!
//! Resolves a request-supplied session token to the authenticated identity.
//! The auth gate middleware is the only caller.

use std::sync::Arc;

use crate::application::session_manager::SessionManager;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub expires_at_ms: i64,
}

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<SessionManager<S>>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<SessionManager<S>>) -> Self {
        Self { sessions }
    }

    /// `Unauthorized` when the token is missing, unknown or expired
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let token = session_token.ok_or(AuthError::Unauthorized)?;

        let session = self
            .sessions
            .validate(token)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        Ok(AuthenticatedUser {
            username: session.username,
            expires_at_ms: session.expires_at_ms,
        })
    }
}
