//! Music Backend Module
//!
//! Track and album metadata owned by signed-in users, plus presigned S3
//! upload URLs. Identity comes from `auth`'s request middleware and is passed
//! into every use case explicitly.
//!
//! Same layering as `auth`:
//! - `domain/` - Entities, repository and storage traits
//! - `application/` - Use cases
//! - `infra/` - Postgres and S3
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::MusicConfig;
pub use error::{MusicError, MusicResult};
pub use infra::{PgMusicRepository, S3Presigner, StorageConfig};
pub use presentation::{MusicAppState, music_router};
