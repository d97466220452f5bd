//! API DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::album::Album;
use crate::domain::track::Track;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignUploadRequest {
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignUploadResponse {
    pub upload_url: String,
    pub key: String,
    pub expires_in: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTrackRequest {
    pub album_id: Option<Uuid>,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub format: String,
    pub key: String,
    pub duration: i32,
    pub file_size: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub track_id: Uuid,
    pub album_id: Option<Uuid>,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration: i32,
    pub file_size: i64,
    pub format: String,
    pub key: String,
    pub cdn_url: String,
}

impl From<Track> for TrackResponse {
    fn from(track: Track) -> Self {
        Self {
            track_id: track.track_id.into_uuid(),
            album_id: track.album_id.map(|id| id.into_uuid()),
            title: track.title,
            artist: track.artist,
            genre: track.genre,
            duration: track.duration_secs,
            file_size: track.file_size,
            format: track.format,
            key: track.key,
            cdn_url: track.cdn_url,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub title: String,
    pub artist: String,
    pub release_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub album_id: Uuid,
    pub title: String,
    pub artist: String,
    pub release_year: Option<i32>,
}

impl From<Album> for AlbumResponse {
    fn from(album: Album) -> Self {
        Self {
            album_id: album.album_id.into_uuid(),
            title: album.title,
            artist: album.artist,
            release_year: album.release_year,
        }
    }
}
