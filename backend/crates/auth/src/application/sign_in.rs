//! Sign In Use Case
//!
//! Verifies credentials and creates a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::session_manager::SessionManager;
use crate::application::verify_credentials::CredentialVerifier;
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Sign in input
#[derive(Debug)]
pub struct SignInInput {
    pub username: String,
    pub password: ClearTextPassword,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: SessionToken,
    pub username: String,
}

/// Sign in use case
pub struct SignInUseCase<C, S>
where
    C: CredentialRepository,
    S: SessionRepository,
{
    verifier: Arc<CredentialVerifier<C>>,
    sessions: Arc<SessionManager<S>>,
}

impl<C, S> SignInUseCase<C, S>
where
    C: CredentialRepository,
    S: SessionRepository,
{
    pub fn new(verifier: Arc<CredentialVerifier<C>>, sessions: Arc<SessionManager<S>>) -> Self {
        Self { verifier, sessions }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let SignInInput { username, password } = input;

        if !self.verifier.verify(&username, password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let session_token = self.sessions.create(&username).await?;

        tracing::info!(username = %username, "Employee signed in");

        Ok(SignInOutput {
            session_token,
            username,
        })
    }
}
