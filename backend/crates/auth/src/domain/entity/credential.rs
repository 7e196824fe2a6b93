//! Credential Entity
//!
//! A provisioned login: username plus the stored PBKDF2 hash.
//! Provisioned out-of-band and never edited at runtime.

use platform::password::HashedPassword;

/// Credential record
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Plain-text identifier, compared with ordinary equality
    pub username: String,
    /// Salt, derived key and iteration count
    pub password_hash: HashedPassword,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password_hash: HashedPassword) -> Self {
        Self {
            username: username.into(),
            password_hash,
        }
    }
}
