//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::password::{PasswordHashError, PasswordHasher};

use crate::application::config::AuthConfig;
use crate::application::{
    GetUserInfoUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, TokenCodec,
    UpdateEmailUseCase, UpdatePasswordUseCase, UpdateUsernameUseCase, UserInfoOutcome,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthResult, LoginError};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, UpdateEmailRequest,
    UpdatePasswordRequest, UpdateUsernameRequest, UserResponse,
};
use crate::presentation::middleware::{CurrentIdentity, IdentityState};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub hasher: Arc<PasswordHasher>,
    pub tokens: Arc<TokenCodec>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Result<Self, PasswordHashError> {
        let hasher = PasswordHasher::new(config.hash_cost, config.password_pepper.clone())?;
        let tokens = TokenCodec::new(config.signing_secret.clone(), config.token_ttl);

        Ok(Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
        })
    }

    /// State for the identity middleware, sharing this codec
    pub fn identity_state(&self) -> IdentityState {
        IdentityState {
            tokens: Arc::clone(&self.tokens),
            cookie_name: Arc::from(self.config.cookie_name.as_str()),
        }
    }
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

// ============================================================================
// Register / Login / Logout
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(with_session_cookie(
        &state.config,
        &output.token,
        (StatusCode::CREATED, Json(UserResponse::from(&output.user))),
    ))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, LoginError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(with_session_cookie(
        &state.config,
        &output.token,
        Json(LoginResponse {
            user_id: output.user_id.to_string(),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logging out only drops the cookie.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Send + Sync + 'static,
{
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, state.config.cookie().expire())],
    )
}

// ============================================================================
// Account (identity required)
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    identity: CurrentIdentity,
) -> AuthResult<Json<MeResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = GetUserInfoUseCase::new(state.repo.clone());

    let response = match use_case.execute(identity.claims()).await? {
        UserInfoOutcome::Authorized(info) => MeResponse {
            authenticated: true,
            user: Some(info.into()),
        },
        UserInfoOutcome::Unauthorized => MeResponse {
            authenticated: false,
            user: None,
        },
    };

    Ok(Json(response))
}

/// POST /api/auth/password
pub async fn update_password<R>(
    State(state): State<AuthAppState<R>>,
    identity: CurrentIdentity,
    Json(req): Json<UpdatePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    UpdatePasswordUseCase::new(state.repo.clone(), state.hasher.clone())
        .execute(identity.claims(), req.old_password, req.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/email
///
/// Re-issues the session cookie so the token's email claim stays current.
pub async fn update_email<R>(
    State(state): State<AuthAppState<R>>,
    identity: CurrentIdentity,
    Json(req): Json<UpdateEmailRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = UpdateEmailUseCase::new(state.repo.clone(), state.tokens.clone())
        .execute(identity.claims(), &req.email)
        .await?;

    Ok(with_session_cookie(&state.config, &token, StatusCode::NO_CONTENT))
}

/// POST /api/auth/username
pub async fn update_username<R>(
    State(state): State<AuthAppState<R>>,
    identity: CurrentIdentity,
    Json(req): Json<UpdateUsernameRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    UpdateUsernameUseCase::new(state.repo.clone())
        .execute(identity.claims(), &req.username)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn with_session_cookie(config: &AuthConfig, token: &str, body: impl IntoResponse) -> Response {
    match config.cookie().issue(token, config.token_ttl) {
        Ok(cookie) => ([(header::SET_COOKIE, cookie)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build session cookie");
            AppError::internal("Internal error").into_response()
        }
    }
}
