//! Domain Layer
//!
//! Contains entities, value objects, the clock and repository traits.

pub mod clock;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{credential::CredentialRecord, session::Session};
pub use repository::{CredentialRepository, SessionRepository};
pub use value_object::session_token::SessionToken;
