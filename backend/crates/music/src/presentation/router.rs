//! Music Router

use axum::{Router, routing::post};

use crate::domain::repository::MusicRepository;
use crate::domain::storage::UploadPresigner;
use crate::presentation::handlers::{self, MusicAppState};

/// Music routes, to be nested under `/api/music` behind `auth::attach_identity`
pub fn music_router<R, P>(state: MusicAppState<R, P>) -> Router
where
    R: MusicRepository + Send + Sync + 'static,
    P: UploadPresigner + Send + Sync + 'static,
{
    Router::new()
        .route("/uploads/track", post(handlers::presign_track_upload::<R, P>))
        .route("/tracks", post(handlers::save_track::<R, P>))
        .route("/albums", post(handlers::create_album::<R, P>))
        .with_state(state)
}
