//! Album Entity

use chrono::{DateTime, Utc};
use kernel::id::{AlbumId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub album_id: AlbumId,
    pub user_id: UserId,
    pub title: String,
    pub artist: String,
    pub release_year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAlbum {
    pub album_id: AlbumId,
    pub user_id: UserId,
    pub title: String,
    pub artist: String,
    pub release_year: Option<i32>,
}

impl NewAlbum {
    #[cfg(test)]
    pub fn into_album(self, now: DateTime<Utc>) -> Album {
        Album {
            album_id: self.album_id,
            user_id: self.user_id,
            title: self.title,
            artist: self.artist,
            release_year: self.release_year,
            created_at: now,
        }
    }
}
