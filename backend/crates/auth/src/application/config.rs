//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::{DEFAULT_ITERATIONS, HashedPassword, PasswordHashError};

use crate::domain::entity::credential::CredentialRecord;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session TTL (8 hours)
    pub session_ttl: Duration,
    /// Interval of the expired-session sweep; `None` relies on lazy expiry only
    pub session_sweep_interval: Option<Duration>,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "mt_session".to_string(),
            session_ttl: Duration::from_secs(8 * 3600), // 8 hours
            session_sweep_interval: Some(Duration::from_secs(600)),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Cookie carrying the session token, Max-Age matching the TTL
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }
}

/// Provisioned credential as it appears in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialConfig {
    pub username: String,
    pub salt_b64: String,
    pub hash_b64: String,
    pub iterations: u32,
}

impl CredentialConfig {
    /// Demo employee record used by development builds
    pub fn demo() -> Self {
        Self {
            username: "memorialtransportation".to_string(),
            salt_b64: "OUC/IzfwuVIiBobZ+tdSFw==".to_string(),
            hash_b64: "sh3/PmSpCThJUlcjiG2GWdT5q5Ip1xkC1lPGDsgSdX4=".to_string(),
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Decode into a credential record
    pub fn into_record(self) -> Result<CredentialRecord, PasswordHashError> {
        let password_hash =
            HashedPassword::from_base64(&self.salt_b64, &self.hash_b64, self.iterations)?;
        Ok(CredentialRecord::new(self.username, password_hash))
    }
}
