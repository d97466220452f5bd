//! Create Album Use Case

use std::sync::Arc;

use auth::Claims;
use kernel::id::AlbumId;

use crate::application::{require_identity, required};
use crate::domain::album::{Album, NewAlbum};
use crate::domain::repository::MusicRepository;
use crate::error::{MusicError, MusicResult};

#[derive(Debug, Clone)]
pub struct CreateAlbumInput {
    pub title: String,
    pub artist: String,
    pub release_year: Option<i32>,
}

pub struct CreateAlbumUseCase<R>
where
    R: MusicRepository,
{
    repo: Arc<R>,
}

impl<R> CreateAlbumUseCase<R>
where
    R: MusicRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, identity: Option<&Claims>, input: CreateAlbumInput) -> MusicResult<Album> {
        let claims = require_identity(identity)?;

        let title = required("title", &input.title)?;
        let artist = required("artist", &input.artist)?;
        if let Some(year) = input.release_year {
            if !(1000..=9999).contains(&year) {
                return Err(MusicError::validation("release_year", "must be a four-digit year"));
            }
        }

        let album = self
            .repo
            .insert_album(NewAlbum {
                album_id: AlbumId::new(),
                user_id: claims.user_id(),
                title,
                artist,
                release_year: input.release_year,
            })
            .await?;

        tracing::info!(user_id = %album.user_id, album_id = %album.album_id, "Album created");

        Ok(album)
    }
}
