//! Object Storage

use std::time::Duration;

use crate::error::MusicResult;

/// Issues time-limited upload URLs
#[trait_variant::make(UploadPresigner: Send)]
pub trait LocalUploadPresigner {
    /// URL that accepts a single PUT of `content_type` to `key`
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> MusicResult<String>;
}
