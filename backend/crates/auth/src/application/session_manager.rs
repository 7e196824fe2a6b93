//! Session Manager
//!
//! Issues, validates and revokes session tokens. Sole owner of the session
//! store: nothing else reads or mutates it.
//!
//! Per-session state machine: `ACTIVE --(revoke | expiry)--> ABSENT`.
//! Expiry is lazy (checked on access); [`spawn_sweeper`] optionally purges
//! expired entries in the background without changing observable behavior.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// Session manager
pub struct SessionManager<S>
where
    S: SessionRepository,
{
    session_repo: S,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<S> SessionManager<S>
where
    S: SessionRepository,
{
    /// Manager reading the wall clock
    pub fn new(session_repo: S, ttl: Duration) -> Self {
        Self::with_clock(session_repo, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(session_repo: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_repo,
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Create a session for `username` and return its token
    ///
    /// The caller is responsible for handing the token to the client.
    pub async fn create(&self, username: &str) -> AuthResult<SessionToken> {
        let token = SessionToken::generate()?;
        let session = Session::new(username, self.clock.now_ms(), self.ttl_ms());
        let expires_at_ms = session.expires_at_ms;

        self.session_repo.insert(&token, session).await?;

        tracing::debug!(username, expires_at_ms, "Session created");
        Ok(token)
    }

    /// Look up a live session
    ///
    /// Unknown tokens return `None`. Expired sessions are deleted and
    /// return `None`.
    pub async fn validate(&self, token: &str) -> AuthResult<Option<Session>> {
        let Some(session) = self.session_repo.find(token).await? else {
            return Ok(None);
        };

        if session.is_expired_at(self.clock.now_ms()) {
            self.session_repo.remove(token).await?;
            tracing::debug!(username = %session.username, "Expired session removed");
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Remove a session and return it; revoking an unknown token is not an error
    pub async fn revoke(&self, token: &str) -> AuthResult<Option<Session>> {
        let revoked = self.session_repo.remove(token).await?;
        if let Some(session) = &revoked {
            tracing::debug!(
                username = %session.username,
                session_age_ms = self.clock.now_ms() - session.created_at_ms,
                "Session revoked"
            );
        }
        Ok(revoked)
    }

    /// Purge every expired session; returns the number removed
    pub async fn sweep_expired(&self) -> AuthResult<usize> {
        self.session_repo.remove_expired(self.clock.now_ms()).await
    }

    /// Number of stored sessions, expired-but-unswept included
    pub async fn session_count(&self) -> AuthResult<usize> {
        self.session_repo.len().await
    }
}

/// Periodically purge expired sessions
///
/// The first sweep happens one `every` after spawning.
pub fn spawn_sweeper<S>(manager: Arc<SessionManager<S>>, every: Duration) -> JoinHandle<()>
where
    S: SessionRepository + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match manager.sweep_expired().await {
                Ok(0) => {}
                Ok(removed) => {
                    tracing::info!(sessions_deleted = removed, "Expired session sweep completed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Expired session sweep failed");
                }
            }
        }
    })
}
