//! Account Update Use Cases
//!
//! Password, email and username changes. Each needs a verified identity and
//! fails with `Unauthorized` without one.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::token::TokenCodec;
use crate::application::{hash_password, verify_password};
use crate::domain::claims::Claims;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, password::parse_password, username::Username};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Password
// ============================================================================

pub struct UpdatePasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    hasher: Arc<PasswordHasher>,
}

impl<R> UpdatePasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, hasher: Arc<PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Re-checks `old_password` against the stored hash before replacing it
    pub async fn execute(
        &self,
        identity: Option<&Claims>,
        old_password: String,
        new_password: String,
    ) -> AuthResult<()> {
        let claims = identity.ok_or(AuthError::Unauthorized)?;
        let user_id = claims.user_id();

        if old_password.is_empty() {
            return Err(AuthError::validation("old_password", "must not be empty"));
        }
        let new_password = parse_password("new_password", new_password)?;

        let user = self
            .repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let matches = match parse_password("old_password", old_password) {
            Ok(old) => verify_password(&self.hasher, old, user.password_hash).await?,
            Err(_) => false,
        };
        if !matches {
            tracing::warn!(user_id = %user_id, "Password change with wrong current password");
            return Err(AuthError::PasswordMismatch);
        }

        let new_hash = hash_password(&self.hasher, new_password).await?;
        self.repo.update_password(&user_id, &new_hash).await?;

        tracing::info!(user_id = %user_id, "Password updated");
        Ok(())
    }
}

// ============================================================================
// Email
// ============================================================================

pub struct UpdateEmailUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenCodec>,
}

impl<R> UpdateEmailUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenCodec>) -> Self {
        Self { repo, tokens }
    }

    /// Returns a fresh token carrying the new email
    pub async fn execute(&self, identity: Option<&Claims>, new_email: &str) -> AuthResult<String> {
        let claims = identity.ok_or(AuthError::Unauthorized)?;
        let user_id = claims.user_id();
        let email = Email::new(new_email)?;

        self.repo.update_email(&user_id, &email).await?;

        tracing::info!(user_id = %user_id, "Email updated");
        Ok(self.tokens.issue(user_id, email.as_str()))
    }
}

// ============================================================================
// Username
// ============================================================================

pub struct UpdateUsernameUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateUsernameUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, identity: Option<&Claims>, new_username: &str) -> AuthResult<()> {
        let claims = identity.ok_or(AuthError::Unauthorized)?;
        let user_id = claims.user_id();
        let username = Username::new(new_username)?;

        self.repo.update_username(&user_id, &username).await?;

        tracing::info!(user_id = %user_id, username = %username, "Username updated");
        Ok(())
    }
}
