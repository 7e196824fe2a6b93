//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the login gate's vocabulary:
//! - The error classification ([`error::kind::ErrorKind`])
//! - The unified error type returned to HTTP clients ([`error::app_error::AppError`])
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across every crate in the workspace.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
