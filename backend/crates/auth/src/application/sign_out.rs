//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::session_manager::SessionManager;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<SessionManager<S>>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<SessionManager<S>>) -> Self {
        Self { sessions }
    }

    /// Sign out from the session carried by the cookie, if any
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<()> {
        let Some(token) = session_token else {
            return Ok(());
        };

        if let Some(session) = self.sessions.revoke(token).await? {
            tracing::info!(username = %session.username, "Employee signed out");
        }
        Ok(())
    }
}
