//! Credential Verifier
//!
//! Checks a submitted username/password against the provisioned credentials.

use platform::password::ClearTextPassword;

use crate::domain::repository::CredentialRepository;
use crate::error::AuthResult;

/// Credential verifier
pub struct CredentialVerifier<C>
where
    C: CredentialRepository,
{
    credential_repo: C,
}

impl<C> CredentialVerifier<C>
where
    C: CredentialRepository,
{
    pub fn new(credential_repo: C) -> Self {
        Self { credential_repo }
    }

    /// `Ok(true)` only if the username is provisioned and the password
    /// derives to the stored hash.
    ///
    /// An unknown username returns `Ok(false)` without running the KDF.
    /// The KDF runs on the blocking pool; `Err` means that task failed.
    pub async fn verify(&self, username: &str, password: ClearTextPassword) -> AuthResult<bool> {
        let Some(record) = self.credential_repo.find_by_username(username).await? else {
            return Ok(false);
        };

        let matches =
            tokio::task::spawn_blocking(move || record.password_hash.verify(&password)).await?;

        Ok(matches)
    }
}
