//! Application Layer
//!
//! Every operation takes the caller's identity as an explicit argument and
//! refuses anonymous callers with `MusicError::Unauthorized`.

pub mod config;
pub mod create_album;
pub mod presign_upload;
pub mod save_track;

use auth::Claims;

use crate::error::{MusicError, MusicResult};

pub use config::MusicConfig;
pub use create_album::{CreateAlbumInput, CreateAlbumUseCase};
pub use presign_upload::{PresignTrackUploadOutput, PresignTrackUploadUseCase};
pub use save_track::{SaveTrackInput, SaveTrackUseCase};

fn require_identity(identity: Option<&Claims>) -> MusicResult<&Claims> {
    identity.ok_or(MusicError::Unauthorized)
}

fn required(field: &'static str, value: &str) -> MusicResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MusicError::validation(field, "must not be empty"));
    }
    Ok(value.to_owned())
}
