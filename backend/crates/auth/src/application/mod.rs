//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod session_manager;
pub mod sign_in;
pub mod sign_out;
pub mod verify_credentials;

// Re-exports
pub use check_session::{AuthenticatedUser, CheckSessionUseCase};
pub use config::{AuthConfig, CredentialConfig};
pub use session_manager::{SessionManager, spawn_sweeper};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use verify_credentials::CredentialVerifier;
