//! Track Entity

use chrono::{DateTime, Utc};
use kernel::id::{AlbumId, TrackId, UserId};

/// Object key prefix for uploaded tracks
pub const TRACK_KEY_PREFIX: &str = "tracks/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub track_id: TrackId,
    pub user_id: UserId,
    pub album_id: Option<AlbumId>,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration_secs: i32,
    pub file_size: i64,
    pub format: String,
    pub key: String,
    pub cdn_url: String,
    pub created_at: DateTime<Utc>,
}

/// Track metadata about to be stored
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub track_id: TrackId,
    pub user_id: UserId,
    pub album_id: Option<AlbumId>,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration_secs: i32,
    pub file_size: i64,
    pub format: String,
    pub key: String,
    pub cdn_url: String,
}

impl NewTrack {
    #[cfg(test)]
    pub fn into_track(self, now: DateTime<Utc>) -> Track {
        Track {
            track_id: self.track_id,
            user_id: self.user_id,
            album_id: self.album_id,
            title: self.title,
            artist: self.artist,
            genre: self.genre,
            duration_secs: self.duration_secs,
            file_size: self.file_size,
            format: self.format,
            key: self.key,
            cdn_url: self.cdn_url,
            created_at: now,
        }
    }
}

/// Key namespace of one uploader: `tracks/{user_id}/`
pub fn owner_key_prefix(user_id: &UserId) -> String {
    format!("{TRACK_KEY_PREFIX}{user_id}/")
}

/// Object key for a new upload: `tracks/{user_id}/{unix_millis}-{filename}`
pub fn track_key(user_id: &UserId, filename: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}{}-{filename}",
        owner_key_prefix(user_id),
        now.timestamp_millis()
    )
}

/// Public URL of a stored object
pub fn cdn_url(cdn_base: &str, key: &str) -> String {
    format!("{}/{key}", cdn_base.trim_end_matches('/'))
}
