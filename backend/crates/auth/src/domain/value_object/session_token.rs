//! Session Token Value Object
//!
//! Opaque bearer token carried in the session cookie.
//! 256 bits from the OS CSPRNG, hex encoded to a fixed 64 characters.

use std::fmt;

use platform::crypto::{EntropyError, random_hex};

/// Token entropy in bytes
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Session token
///
/// Uniqueness among live sessions relies on entropy alone; no collision
/// check is performed. Debug output is redacted so tokens never reach logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token
    pub fn generate() -> Result<Self, EntropyError> {
        random_hex(SESSION_TOKEN_BYTES).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
