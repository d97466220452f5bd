//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::MusicAppState;
pub use router::music_router;
