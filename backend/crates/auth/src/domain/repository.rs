//! Repository Traits
//!
//! Interfaces for credential lookup and session storage. Implementations are
//! in the infrastructure layer.

use crate::domain::entity::{credential::CredentialRecord, session::Session};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// Credential lookup
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find the credential provisioned for `username` (exact match)
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<CredentialRecord>>;
}

/// Session storage, owned exclusively by the session manager
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a session under its token, replacing any previous entry
    async fn insert(&self, token: &SessionToken, session: Session) -> AuthResult<()>;

    /// Find session by token (expired entries included)
    async fn find(&self, token: &str) -> AuthResult<Option<Session>>;

    /// Remove a session; returns the removed entry, if any
    async fn remove(&self, token: &str) -> AuthResult<Option<Session>>;

    /// Remove every session expired at `now_ms`; returns the number removed
    async fn remove_expired(&self, now_ms: i64) -> AuthResult<usize>;

    /// Number of stored sessions
    async fn len(&self) -> AuthResult<usize>;
}
