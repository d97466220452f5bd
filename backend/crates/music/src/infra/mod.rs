//! Infrastructure Layer
//!
//! Postgres persistence and S3 presigning.

pub mod postgres;
pub mod s3;

pub use postgres::PgMusicRepository;
pub use s3::{S3Presigner, StorageConfig};
