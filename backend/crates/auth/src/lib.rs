//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, clock, repository traits
//! - `application/` - Credential verifier, session manager, use cases
//! - `infra/` - In-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, auth gate, router
//!
//! ## Features
//! - Single provisioned employee account (username + PBKDF2 hash)
//! - Server-side sessions keyed by an opaque cookie token
//! - `POST /login`, `POST /logout`, `GET /me`
//!
//! ## Security Model
//! - PBKDF2-HMAC-SHA256, constant-time digest comparison
//! - Key derivation runs off the async workers
//! - 256-bit session tokens from the OS CSPRNG
//! - HttpOnly + SameSite=Lax cookie, Secure in production
//! - Sessions expire after a fixed TTL; no sliding renewal

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, CredentialConfig};
pub use application::{SessionManager, spawn_sweeper};
pub use error::{AuthError, AuthResult};
pub use infra::memory::{InMemorySessionRepository, StaticCredentialRepository};
pub use presentation::handlers::AuthAppState;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

#[cfg(test)]
mod tests;
