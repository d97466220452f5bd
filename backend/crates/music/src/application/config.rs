//! Music Configuration

use std::time::Duration;

/// Lifetime of presigned upload URLs (15 minutes)
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone)]
pub struct MusicConfig {
    /// Public base URL objects are served from
    pub cdn_base_url: String,
    pub upload_url_ttl: Duration,
}

impl MusicConfig {
    pub fn new(cdn_base_url: impl Into<String>) -> Self {
        Self {
            cdn_base_url: cdn_base_url.into(),
            upload_url_ttl: UPLOAD_URL_TTL,
        }
    }
}
