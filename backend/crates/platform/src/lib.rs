//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (OS randomness, Base64, constant-time compare)
//! - Password hashing (PBKDF2-HMAC-SHA256)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
