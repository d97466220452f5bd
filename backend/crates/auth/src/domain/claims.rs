//! Token Claims
//!
//! The signed payload carried by a session token. The shape is fixed: a token
//! whose payload has missing or extra fields is rejected as malformed.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Verified identity of a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds, exclusive)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }

    /// Valid strictly before `exp`, and not before `iat`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let now = now.timestamp();
        self.iat <= now && now < self.exp
    }
}

/// Token verification failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,
}

impl TokenError {
    /// Stable label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
        }
    }
}
