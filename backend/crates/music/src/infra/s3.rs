//! S3 Presigned Uploads

use std::fmt;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;

use crate::domain::storage::UploadPresigner;
use crate::error::{MusicError, MusicResult};

/// Bucket location and static credentials
#[derive(Clone)]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("access_key_id", &"[REDACTED]")
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct S3Presigner {
    client: Client,
    bucket: String,
}

impl S3Presigner {
    pub async fn connect(config: StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id,
            config.secret_access_key,
            None,
            None,
            "music-upload",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket,
        }
    }
}

impl UploadPresigner for S3Presigner {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> MusicResult<String> {
        let presigning =
            PresigningConfig::expires_in(expires_in).map_err(|e| MusicError::Presign(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| MusicError::Presign(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}
