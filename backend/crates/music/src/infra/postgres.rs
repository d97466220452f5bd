//! PostgreSQL Music Repository

use chrono::{DateTime, Utc};
use kernel::id::{AlbumId, TrackId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::album::{Album, NewAlbum};
use crate::domain::repository::MusicRepository;
use crate::domain::track::{NewTrack, Track};
use crate::error::MusicResult;

#[derive(Clone)]
pub struct PgMusicRepository {
    pool: PgPool,
}

impl PgMusicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MusicRepository for PgMusicRepository {
    async fn insert_album(&self, album: NewAlbum) -> MusicResult<Album> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            INSERT INTO albums (album_id, user_id, title, artist, release_year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING album_id, user_id, title, artist, release_year, created_at
            "#,
        )
        .bind(album.album_id.as_uuid())
        .bind(album.user_id.as_uuid())
        .bind(&album.title)
        .bind(&album.artist)
        .bind(album.release_year)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_album())
    }

    async fn album_owner(&self, album_id: &AlbumId) -> MusicResult<Option<UserId>> {
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM albums WHERE album_id = $1")
                .bind(album_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(owner.map(UserId::from_uuid))
    }

    async fn insert_track(&self, track: NewTrack) -> MusicResult<Track> {
        let row = sqlx::query_as::<_, TrackRow>(
            r#"
            INSERT INTO tracks (
                track_id,
                user_id,
                album_id,
                title,
                artist,
                genre,
                duration_secs,
                file_size,
                format,
                key,
                cdn_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING
                track_id, user_id, album_id, title, artist, genre,
                duration_secs, file_size, format, key, cdn_url, created_at
            "#,
        )
        .bind(track.track_id.as_uuid())
        .bind(track.user_id.as_uuid())
        .bind(track.album_id.map(AlbumId::into_uuid))
        .bind(&track.title)
        .bind(&track.artist)
        .bind(&track.genre)
        .bind(track.duration_secs)
        .bind(track.file_size)
        .bind(&track.format)
        .bind(&track.key)
        .bind(&track.cdn_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_track())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AlbumRow {
    album_id: Uuid,
    user_id: Uuid,
    title: String,
    artist: String,
    release_year: Option<i32>,
    created_at: DateTime<Utc>,
}

impl AlbumRow {
    fn into_album(self) -> Album {
        Album {
            album_id: AlbumId::from_uuid(self.album_id),
            user_id: UserId::from_uuid(self.user_id),
            title: self.title,
            artist: self.artist,
            release_year: self.release_year,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TrackRow {
    track_id: Uuid,
    user_id: Uuid,
    album_id: Option<Uuid>,
    title: String,
    artist: String,
    genre: String,
    duration_secs: i32,
    file_size: i64,
    format: String,
    key: String,
    cdn_url: String,
    created_at: DateTime<Utc>,
}

impl TrackRow {
    fn into_track(self) -> Track {
        Track {
            track_id: TrackId::from_uuid(self.track_id),
            user_id: UserId::from_uuid(self.user_id),
            album_id: self.album_id.map(AlbumId::from_uuid),
            title: self.title,
            artist: self.artist,
            genre: self.genre,
            duration_secs: self.duration_secs,
            file_size: self.file_size,
            format: self.format,
            key: self.key,
            cdn_url: self.cdn_url,
            created_at: self.created_at,
        }
    }
}
