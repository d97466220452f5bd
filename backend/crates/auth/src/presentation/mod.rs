//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the identity middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{CurrentIdentity, IdentityState, attach_identity, take_identity};
pub use router::auth_router;
