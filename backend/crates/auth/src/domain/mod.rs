//! Domain Layer
//!
//! Entities, value objects, token claims and the credential store trait.

pub mod claims;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use claims::{Claims, TokenError};
pub use entity::user::{NewUser, User};
pub use repository::{StoreError, UserRepository};
