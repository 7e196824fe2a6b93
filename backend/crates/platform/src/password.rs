//! Password Hashing and Verification
//!
//! Salted, iterated password hashing with PBKDF2-HMAC-SHA256:
//! - 32-byte derived key, per-credential random salt
//! - Iteration count stored alongside the hash, fixed at provisioning time
//! - Constant-time comparison of the derived key against the stored hash
//! - Zeroization of clear text passwords and derived keys
//!
//! ## Security Features
//! - Iterations make every guess cost the same CPU time as a login
//! - Zeroization prevents memory inspection attacks
//! - Debug output of secrets is redacted

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{EntropyError, constant_time_eq, from_base64, random_bytes, to_base64};

// ============================================================================
// Constants
// ============================================================================

/// Iteration count used when provisioning new credentials
pub const DEFAULT_ITERATIONS: u32 = 200_000;

/// Salt length generated for new credentials (128 bits)
pub const SALT_LENGTH: usize = 16;

/// Derived key length (256 bits)
pub const HASH_LENGTH: usize = 32;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while loading or provisioning a stored hash
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// A stored field was not valid base64
    #[error("Invalid base64 in {field}")]
    InvalidEncoding {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    /// Iteration count of zero is rejected by PBKDF2
    #[error("Iteration count must be greater than zero")]
    ZeroIterations,

    /// The stored hash decoded to zero bytes
    #[error("Stored password hash is empty")]
    EmptyHash,

    /// Salt generation failed
    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Login accepts any string here: an empty or short password is not a
/// policy error, it simply fails verification.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Get the password as bytes for hashing (UTF-8, no normalization)
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<String> for ClearTextPassword {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Derive the PBKDF2-HMAC-SHA256 key for `password` and `salt`
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut key = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    key
}

/// Stored credential hash: salt, derived key and iteration count
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashedPassword};
///
/// let password = ClearTextPassword::new("correct horse".to_string());
/// let hashed = HashedPassword::generate(&password, 1_000).unwrap();
///
/// assert!(hashed.verify(&password));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    salt: Vec<u8>,
    hash: Vec<u8>,
    iterations: u32,
}

impl HashedPassword {
    /// Build from raw parts (e.g., decoded configuration)
    ///
    /// The hash length is not checked against [`HASH_LENGTH`]: a stored hash
    /// of any other length never verifies.
    pub fn from_parts(
        salt: Vec<u8>,
        hash: Vec<u8>,
        iterations: u32,
    ) -> Result<Self, PasswordHashError> {
        if iterations == 0 {
            return Err(PasswordHashError::ZeroIterations);
        }
        if hash.is_empty() {
            return Err(PasswordHashError::EmptyHash);
        }
        Ok(Self {
            salt,
            hash,
            iterations,
        })
    }

    /// Build from base64-encoded salt and hash
    pub fn from_base64(
        salt_b64: &str,
        hash_b64: &str,
        iterations: u32,
    ) -> Result<Self, PasswordHashError> {
        let salt = from_base64(salt_b64.trim()).map_err(|source| {
            PasswordHashError::InvalidEncoding {
                field: "salt",
                source,
            }
        })?;
        let hash = from_base64(hash_b64.trim()).map_err(|source| {
            PasswordHashError::InvalidEncoding {
                field: "hash",
                source,
            }
        })?;
        Self::from_parts(salt, hash, iterations)
    }

    /// Hash a new password with a fresh random salt
    pub fn generate(
        password: &ClearTextPassword,
        iterations: u32,
    ) -> Result<Self, PasswordHashError> {
        if iterations == 0 {
            return Err(PasswordHashError::ZeroIterations);
        }
        let salt = random_bytes(SALT_LENGTH)?;
        let hash = derive_key(password.as_bytes(), &salt, iterations).to_vec();
        Self::from_parts(salt, hash, iterations)
    }

    /// Verify a password against this hash
    ///
    /// Runs the full KDF once, then compares in constant time. Never panics,
    /// including when the stored hash has an unexpected length.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let mut derived = derive_key(password.as_bytes(), &self.salt, self.iterations);
        let matches = constant_time_eq(&derived, &self.hash);
        derived.zeroize();
        matches
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt_base64(&self) -> String {
        to_base64(&self.salt)
    }

    pub fn hash_base64(&self) -> String {
        to_base64(&self.hash)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("iterations", &self.iterations)
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
