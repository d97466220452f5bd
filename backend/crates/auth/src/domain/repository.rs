//! Credential Store
//!
//! Interface for user persistence. The Postgres implementation lives in
//! `infra::postgres`; tests use an in-memory one.

use kernel::id::UserId;
use platform::password::HashedPassword;
use thiserror::Error;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{email::Email, username::Username};

/// Store failures
///
/// Duplicate kinds are decided by which uniqueness constraint fired.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no matching user")]
    NotFound,

    #[error("email already in use")]
    DuplicateEmail,

    #[error("username already in use")]
    DuplicateUsername,

    #[error(transparent)]
    Unavailable(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, user_id: &UserId) -> StoreResult<Option<User>>;

    /// Insert a new account, failing with a duplicate kind on conflict
    async fn insert(&self, user: NewUser) -> StoreResult<User>;

    async fn update_password(&self, user_id: &UserId, hash: &HashedPassword) -> StoreResult<()>;

    async fn update_email(&self, user_id: &UserId, email: &Email) -> StoreResult<()>;

    /// Fails with `NotFound` unless exactly one row changed
    async fn update_username(&self, user_id: &UserId, username: &Username) -> StoreResult<()>;
}
