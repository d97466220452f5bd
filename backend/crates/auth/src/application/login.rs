//! Login Use Case

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::PasswordHasher;

use crate::application::token::TokenCodec;
use crate::application::{verify_decoy, verify_password};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, password::parse_password};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub token: String,
    pub user_id: UserId,
}

pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenCodec>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, hasher: Arc<PasswordHasher>, tokens: Arc<TokenCodec>) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    /// `UserNotFound` and `InvalidPassword` stay distinct here; the HTTP layer
    /// presents both the same way.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        if input.email.trim().is_empty() {
            return Err(AuthError::validation("email", "must not be empty"));
        }
        if input.password.is_empty() {
            return Err(AuthError::validation("password", "must not be empty"));
        }

        // A password the current policy would refuse cannot match any stored hash
        let password = parse_password("password", input.password).ok();

        // No stored account has a malformed email
        let user = match Email::new(&input.email) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            if let Some(password) = password {
                verify_decoy(&self.hasher, password).await?;
            }
            tracing::warn!(reason = "user_not_found", "Login failed");
            return Err(AuthError::UserNotFound);
        };

        let matches = match password {
            Some(password) => {
                verify_password(&self.hasher, password, user.password_hash.clone()).await?
            }
            None => false,
        };

        if !matches {
            tracing::warn!(
                reason = "invalid_password",
                user_id = %user.user_id,
                "Login failed"
            );
            return Err(AuthError::InvalidPassword);
        }

        let token = self.tokens.issue(user.user_id, user.email.as_str());

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            token,
            user_id: user.user_id,
        })
    }
}
