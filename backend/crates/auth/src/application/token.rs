//! Session Token Codec
//!
//! Compact JWS (`header.claims.signature`, base64url without padding) signed
//! with HMAC-SHA256. The algorithm is pinned: the `alg` header is checked
//! against `HS256`, never used to pick a verifier.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::claims::{Claims, TokenError};

const ALGORITHM: &str = "HS256";

// ============================================================================
// Signing Secret
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("signing secret must not be empty")]
pub struct EmptySecret;

/// HMAC key, fixed for the life of the process
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, EmptySecret> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(EmptySecret);
        }
        Ok(Self(bytes))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Codec
// ============================================================================

#[derive(Deserialize)]
struct Header {
    alg: String,
}

/// Issues and verifies session tokens
#[derive(Debug, Clone)]
pub struct TokenCodec {
    secret: SigningSecret,
    ttl_secs: i64,
    header_b64: String,
}

impl TokenCodec {
    pub fn new(secret: SigningSecret, ttl: Duration) -> Self {
        let header = json!({ "alg": ALGORITHM, "typ": "JWT" }).to_string();
        Self {
            secret,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            header_b64: to_base64url(header.as_bytes()),
        }
    }

    pub fn issue(&self, user_id: UserId, email: &str) -> String {
        self.issue_at(user_id, email, Utc::now())
    }

    pub fn issue_at(&self, user_id: UserId, email: &str, now: DateTime<Utc>) -> String {
        let iat = now.timestamp();
        let payload = json!({
            "sub": user_id.into_uuid(),
            "email": email,
            "iat": iat,
            "exp": iat.saturating_add(self.ttl_secs),
        })
        .to_string();

        let signing_input = format!("{}.{}", self.header_b64, to_base64url(payload.as_bytes()));
        let signature = hmac_sha256(self.secret.as_bytes(), signing_input.as_bytes());

        format!("{signing_input}.{}", to_base64url(&signature))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Check structure, algorithm, signature, then validity window
    ///
    /// The claims segment is only decoded once the signature has matched.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut segments = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_json(header_b64).ok_or(TokenError::Malformed)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::InvalidSignature);
        }

        let signature = from_base64url(signature_b64).map_err(|_| TokenError::InvalidSignature)?;
        let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
        if !verify_hmac_sha256(self.secret.as_bytes(), signing_input.as_bytes(), &signature) {
            return Err(TokenError::InvalidSignature);
        }

        let claims: Claims = decode_json(claims_b64).ok_or(TokenError::Malformed)?;
        if !claims.is_valid_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn decode_json<T: DeserializeOwned>(segment: &str) -> Option<T> {
    let bytes = from_base64url(segment).ok()?;
    serde_json::from_slice(&bytes).ok()
}
