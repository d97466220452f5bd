//! Shared Kernel
//!
//! Vocabulary shared by every crate of the music service:
//! - Typed identifiers for users, tracks and albums
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - Conversions from driver errors and into HTTP responses (feature-gated)
//!
//! Only things whose meaning is the same in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
