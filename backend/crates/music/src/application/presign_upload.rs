//! Presign Track Upload Use Case

use std::sync::Arc;

use auth::Claims;
use chrono::Utc;

use crate::application::config::MusicConfig;
use crate::application::{require_identity, required};
use crate::domain::storage::UploadPresigner;
use crate::domain::track::track_key;
use crate::error::{MusicError, MusicResult};

#[derive(Debug, Clone)]
pub struct PresignTrackUploadOutput {
    pub upload_url: String,
    pub key: String,
    pub expires_in_secs: u64,
}

pub struct PresignTrackUploadUseCase<P>
where
    P: UploadPresigner,
{
    presigner: Arc<P>,
    config: Arc<MusicConfig>,
}

impl<P> PresignTrackUploadUseCase<P>
where
    P: UploadPresigner,
{
    pub fn new(presigner: Arc<P>, config: Arc<MusicConfig>) -> Self {
        Self { presigner, config }
    }

    pub async fn execute(
        &self,
        identity: Option<&Claims>,
        filename: &str,
        content_type: &str,
    ) -> MusicResult<PresignTrackUploadOutput> {
        let claims = require_identity(identity)?;

        let filename = required("filename", filename)?;
        if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
            return Err(MusicError::validation("filename", "must be a bare file name"));
        }
        let content_type = required("content_type", content_type)?;

        let key = track_key(&claims.user_id(), &filename, Utc::now());
        let ttl = self.config.upload_url_ttl;
        let upload_url = self.presigner.presign_put(&key, &content_type, ttl).await?;

        tracing::info!(user_id = %claims.sub, key = %key, "Track upload presigned");

        Ok(PresignTrackUploadOutput {
            upload_url,
            key,
            expires_in_secs: ttl.as_secs(),
        })
    }
}
