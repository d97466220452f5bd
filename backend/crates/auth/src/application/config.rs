//! Application Configuration

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::HashCost;

use crate::application::token::SigningSecret;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Name of the cookie carrying the session token
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Token lifetime (24 hours)
pub const TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie the identity middleware reads
    pub cookie_name: String,
    /// HMAC key for session tokens
    pub signing_secret: SigningSecret,
    pub token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    pub hash_cost: HashCost,
}

impl AuthConfig {
    pub fn new(signing_secret: SigningSecret) -> Self {
        Self {
            cookie_name: AUTH_COOKIE_NAME.to_string(),
            signing_secret,
            token_ttl: TOKEN_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            hash_cost: HashCost::default(),
        }
    }

    /// Config for development (insecure cookie)
    pub fn development(signing_secret: SigningSecret) -> Self {
        Self {
            cookie_secure: false,
            ..Self::new(signing_secret)
        }
    }

    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            ..CookieConfig::new(self.cookie_name.clone())
        }
    }
}
