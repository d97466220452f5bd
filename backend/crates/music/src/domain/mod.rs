//! Domain Layer
//!
//! Tracks, albums, and the persistence and storage traits.

pub mod album;
pub mod repository;
pub mod storage;
pub mod track;

pub use album::{Album, NewAlbum};
pub use repository::MusicRepository;
pub use storage::UploadPresigner;
pub use track::{NewTrack, Track};
