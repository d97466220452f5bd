//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the service crates:
//! - Cryptographic primitives (HMAC-SHA256, base64url)
//! - Password hashing (Argon2id)
//! - Cookie construction and extraction
//! - Environment configuration helpers

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod password;
