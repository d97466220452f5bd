//! Application Layer
//!
//! Token codec and one use case per auth operation.

pub mod config;
pub mod login;
pub mod register;
pub mod token;
pub mod update_account;
pub mod user_info;

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};

use crate::error::{AuthError, AuthResult};

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{SigningSecret, TokenCodec};
pub use update_account::{UpdateEmailUseCase, UpdatePasswordUseCase, UpdateUsernameUseCase};
pub use user_info::{GetUserInfoUseCase, UserInfo, UserInfoOutcome};

/// Argon2 off the async workers
pub(crate) async fn hash_password(
    hasher: &Arc<PasswordHasher>,
    password: ClearTextPassword,
) -> AuthResult<HashedPassword> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::HashingFailure(e.to_string()))?
        .map_err(|e| AuthError::HashingFailure(e.to_string()))
}

/// Same cost as `verify_password`, for a login with no account behind it
pub(crate) async fn verify_decoy(
    hasher: &Arc<PasswordHasher>,
    password: ClearTextPassword,
) -> AuthResult<()> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.verify_decoy(&password))
        .await
        .map_err(|e| AuthError::HashingFailure(e.to_string()))
}

pub(crate) async fn verify_password(
    hasher: &Arc<PasswordHasher>,
    password: ClearTextPassword,
    hashed: HashedPassword,
) -> AuthResult<bool> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hashed))
        .await
        .map_err(|e| AuthError::HashingFailure(e.to_string()))
}
