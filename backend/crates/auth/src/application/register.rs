//! Register Use Case
//!
//! Creates a new account and signs the caller in.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::hash_password;
use crate::application::token::TokenCodec;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, password::parse_password, username::Username};
use crate::error::AuthResult;

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterOutput {
    pub token: String,
    pub user: User,
}

pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenCodec>,
}

impl<R> RegisterUseCase<R>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let username = Username::new(&input.username)?;
        let email = Email::new(&input.email)?;
        let password = parse_password("password", input.password)?;

        let password_hash = hash_password(&self.hasher, password).await?;

        // No pre-check: the unique constraints decide duplicates
        let user = self
            .repo
            .insert(NewUser::new(email, username, password_hash))
            .await?;

        let token = self.tokens.issue(user.user_id, user.email.as_str());

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            "User registered"
        );

        Ok(RegisterOutput { token, user })
    }
}
