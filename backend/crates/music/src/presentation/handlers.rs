//! HTTP Handlers

use std::sync::Arc;

use auth::CurrentIdentity;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::application::{
    CreateAlbumInput, CreateAlbumUseCase, MusicConfig, PresignTrackUploadUseCase, SaveTrackInput,
    SaveTrackUseCase,
};
use crate::domain::repository::MusicRepository;
use crate::domain::storage::UploadPresigner;
use crate::error::MusicResult;
use crate::presentation::dto::{
    AlbumResponse, CreateAlbumRequest, PresignUploadRequest, PresignUploadResponse,
    SaveTrackRequest, TrackResponse,
};

/// Shared state for music handlers
pub struct MusicAppState<R, P>
where
    R: MusicRepository + Send + Sync + 'static,
    P: UploadPresigner + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub presigner: Arc<P>,
    pub config: Arc<MusicConfig>,
}

impl<R, P> MusicAppState<R, P>
where
    R: MusicRepository + Send + Sync + 'static,
    P: UploadPresigner + Send + Sync + 'static,
{
    pub fn new(repo: R, presigner: P, config: MusicConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            presigner: Arc::new(presigner),
            config: Arc::new(config),
        }
    }
}

impl<R, P> Clone for MusicAppState<R, P>
where
    R: MusicRepository + Send + Sync + 'static,
    P: UploadPresigner + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            presigner: Arc::clone(&self.presigner),
            config: Arc::clone(&self.config),
        }
    }
}

/// POST /api/music/uploads/track
pub async fn presign_track_upload<R, P>(
    State(state): State<MusicAppState<R, P>>,
    identity: CurrentIdentity,
    Json(req): Json<PresignUploadRequest>,
) -> MusicResult<Json<PresignUploadResponse>>
where
    R: MusicRepository + Send + Sync + 'static,
    P: UploadPresigner + Send + Sync + 'static,
{
    let output = PresignTrackUploadUseCase::new(state.presigner.clone(), state.config.clone())
        .execute(identity.claims(), &req.filename, &req.content_type)
        .await?;

    Ok(Json(PresignUploadResponse {
        upload_url: output.upload_url,
        key: output.key,
        expires_in: output.expires_in_secs,
    }))
}

/// POST /api/music/tracks
pub async fn save_track<R, P>(
    State(state): State<MusicAppState<R, P>>,
    identity: CurrentIdentity,
    Json(req): Json<SaveTrackRequest>,
) -> MusicResult<(StatusCode, Json<TrackResponse>)>
where
    R: MusicRepository + Send + Sync + 'static,
    P: UploadPresigner + Send + Sync + 'static,
{
    let input = SaveTrackInput {
        album_id: req.album_id,
        title: req.title,
        artist: req.artist,
        genre: req.genre,
        format: req.format,
        key: req.key,
        duration_secs: req.duration,
        file_size: req.file_size,
    };

    let track = SaveTrackUseCase::new(state.repo.clone(), state.config.clone())
        .execute(identity.claims(), input)
        .await?;

    Ok((StatusCode::CREATED, Json(track.into())))
}

/// POST /api/music/albums
pub async fn create_album<R, P>(
    State(state): State<MusicAppState<R, P>>,
    identity: CurrentIdentity,
    Json(req): Json<CreateAlbumRequest>,
) -> MusicResult<(StatusCode, Json<AlbumResponse>)>
where
    R: MusicRepository + Send + Sync + 'static,
    P: UploadPresigner + Send + Sync + 'static,
{
    let album = CreateAlbumUseCase::new(state.repo.clone())
        .execute(
            identity.claims(),
            CreateAlbumInput {
                title: req.title,
                artist: req.artist,
                release_year: req.release_year,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(album.into())))
}
