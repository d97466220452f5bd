//! Value Objects
//!
//! Validated input shapes. Construction fails with `AuthError::Validation`.

pub mod email;
pub mod password;
pub mod username;

pub use email::Email;
pub use username::Username;
