//! Session Entity
//!
//! One authenticated login. Stored in memory, keyed by its session token.

/// Session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Owner of the session
    pub username: String,
    /// Session creation (Unix timestamp ms)
    pub created_at_ms: i64,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl Session {
    /// Create a session starting at `now_ms`
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(username: impl Into<String>, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            username: username.into(),
            created_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(ttl_ms),
        }
    }

    /// Expired strictly after `expires_at_ms`; the boundary instant is still valid
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at_ms
    }
}
