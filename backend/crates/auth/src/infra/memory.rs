//! In-Memory Repository Implementations
//!
//! Sessions live only in process memory and are lost on restart.
//! Credentials are loaded from configuration at startup.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::entity::{credential::CredentialRecord, session::Session};
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

// ============================================================================
// Session Repository Implementation
// ============================================================================

/// Session map guarded by an async `RwLock`
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, token: &SessionToken, session: Session) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(token.as_str().to_owned(), session);
        Ok(())
    }

    async fn find(&self, token: &str) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> AuthResult<Option<Session>> {
        Ok(self.sessions.write().await.remove(token))
    }

    async fn remove_expired(&self, now_ms: i64) -> AuthResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now_ms));
        Ok(before - sessions.len())
    }

    async fn len(&self) -> AuthResult<usize> {
        Ok(self.sessions.read().await.len())
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

/// Fixed set of credentials keyed by username
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialRepository {
    credentials: HashMap<String, CredentialRecord>,
}

impl StaticCredentialRepository {
    pub fn new(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        Self {
            credentials: records
                .into_iter()
                .map(|record| (record.username.clone(), record))
                .collect(),
        }
    }

    /// Repository holding exactly one credential
    pub fn single(record: CredentialRecord) -> Self {
        Self::new([record])
    }
}

impl CredentialRepository for StaticCredentialRepository {
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<CredentialRecord>> {
        Ok(self.credentials.get(username).cloned())
    }
}
