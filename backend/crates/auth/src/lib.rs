//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, claims, credential store trait
//! - `application/` - Token codec and use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, identity middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless HMAC-SHA256 session tokens in the `auth_token` cookie
//! - Password, email and username changes for signed-in users
//! - Per-request identity that downstream operations read explicitly
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Token algorithm pinned to HS256; claims decoded only after the MAC matches
//! - Login does not reveal whether the email or the password was wrong

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{SigningSecret, TokenCodec};
pub use domain::claims::{Claims, TokenError};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{CurrentIdentity, IdentityState, attach_identity, take_identity};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
