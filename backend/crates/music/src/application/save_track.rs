//! Save Track Use Case
//!
//! Records metadata for a track already uploaded through a presigned URL.

use std::sync::Arc;

use auth::Claims;
use kernel::id::{AlbumId, TrackId};
use uuid::Uuid;

use crate::application::config::MusicConfig;
use crate::application::{require_identity, required};
use crate::domain::repository::MusicRepository;
use crate::domain::track::{NewTrack, Track, cdn_url, owner_key_prefix};
use crate::error::{MusicError, MusicResult};

#[derive(Debug, Clone)]
pub struct SaveTrackInput {
    pub album_id: Option<Uuid>,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub format: String,
    pub key: String,
    pub duration_secs: i32,
    pub file_size: i64,
}

pub struct SaveTrackUseCase<R>
where
    R: MusicRepository,
{
    repo: Arc<R>,
    config: Arc<MusicConfig>,
}

impl<R> SaveTrackUseCase<R>
where
    R: MusicRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<MusicConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, identity: Option<&Claims>, input: SaveTrackInput) -> MusicResult<Track> {
        let claims = require_identity(identity)?;
        let user_id = claims.user_id();

        let title = required("title", &input.title)?;
        let artist = required("artist", &input.artist)?;
        let key = required("key", &input.key)?;
        // Only objects presigned for this caller
        let prefix = owner_key_prefix(&user_id);
        if !key.starts_with(&prefix) || key.len() == prefix.len() {
            return Err(MusicError::validation(
                "key",
                format!("must be an uploaded object under {prefix}"),
            ));
        }
        if input.duration_secs < 0 {
            return Err(MusicError::validation("duration", "must not be negative"));
        }
        if input.file_size < 0 {
            return Err(MusicError::validation("file_size", "must not be negative"));
        }

        let album_id = input.album_id.map(AlbumId::from_uuid);
        if let Some(album_id) = &album_id {
            match self.repo.album_owner(album_id).await? {
                Some(owner) if owner == user_id => {}
                _ => return Err(MusicError::AlbumNotFound),
            }
        }

        let track = self
            .repo
            .insert_track(NewTrack {
                track_id: TrackId::new(),
                user_id,
                album_id,
                title,
                artist,
                genre: input.genre.trim().to_owned(),
                duration_secs: input.duration_secs,
                file_size: input.file_size,
                format: input.format.trim().to_owned(),
                cdn_url: cdn_url(&self.config.cdn_base_url, &key),
                key,
            })
            .await?;

        tracing::info!(
            user_id = %track.user_id,
            track_id = %track.track_id,
            "Track saved"
        );

        Ok(track)
    }
}
