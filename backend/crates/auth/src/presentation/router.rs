//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Auth routes, to be nested under `/api/auth`
///
/// Expects `attach_identity` to run in front of it.
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/me", get(handlers::me::<R>))
        .route("/password", post(handlers::update_password::<R>))
        .route("/email", post(handlers::update_email::<R>))
        .route("/username", post(handlers::update_username::<R>))
        .with_state(state)
}
