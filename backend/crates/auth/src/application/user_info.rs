//! Get User Info Use Case
//!
//! Anonymous callers get `UserInfoOutcome::Unauthorized`, a normal result
//! rather than an error.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::claims::Claims;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInfoOutcome {
    Authorized(UserInfo),
    Unauthorized,
}

pub struct GetUserInfoUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> GetUserInfoUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, identity: Option<&Claims>) -> AuthResult<UserInfoOutcome> {
        let Some(claims) = identity else {
            return Ok(UserInfoOutcome::Unauthorized);
        };

        let user = self
            .repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserInfoOutcome::Authorized(UserInfo {
            user_id: user.user_id,
            email: user.email.into_inner(),
            username: user.username.as_str().to_owned(),
            created_at: user.created_at,
        }))
    }
}
