//! Request Identity Middleware
//!
//! Reads the session cookie, verifies it, and leaves the claims in the
//! request extensions. Never rejects a request: a missing or bad token just
//! means the request continues anonymously, and operations that need an
//! identity refuse it themselves.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::Extensions;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::read_cookie;

use crate::application::token::TokenCodec;
use crate::domain::claims::Claims;

/// Middleware state
#[derive(Clone)]
pub struct IdentityState {
    pub tokens: Arc<TokenCodec>,
    pub cookie_name: Arc<str>,
}

/// Only `take_identity` can read this back out
#[derive(Clone)]
struct VerifiedIdentity(Claims);

/// Attach the caller's verified identity, if any
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn attach_identity(
    State(state): State<IdentityState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = read_cookie(req.headers(), &state.cookie_name) {
        match state.tokens.verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(VerifiedIdentity(claims));
            }
            Err(e) => {
                tracing::debug!(reason = e.as_str(), "Ignoring unusable auth token");
            }
        }
    }

    next.run(req).await
}

/// Remove and return the request's identity
///
/// Read-once: a second call on the same request yields `None`.
pub fn take_identity(extensions: &mut Extensions) -> Option<Claims> {
    extensions
        .remove::<VerifiedIdentity>()
        .map(|VerifiedIdentity(claims)| claims)
}

/// Handler extractor over `take_identity`
///
/// Never rejects; anonymous requests get `CurrentIdentity(None)`.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<Claims>);

impl CurrentIdentity {
    pub fn claims(&self) -> Option<&Claims> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(take_identity(&mut parts.extensions)))
    }
}
