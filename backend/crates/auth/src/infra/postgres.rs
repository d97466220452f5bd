//! PostgreSQL Credential Store

use chrono::{DateTime, Utc};
use kernel::error::conversions::violated_unique_constraint;
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{StoreError, StoreResult, UserRepository};
use crate::domain::value_object::{email::Email, username::Username};

/// Unique constraint on `users.email`
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Unique constraint on `users.username`
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "user_id, email, username, password_hash, created_at, updated_at";

impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (user_id, email, username, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.username.as_str())
        .bind(user.password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        row.into_user()
    }

    async fn update_password(&self, user_id: &UserId, hash: &HashedPassword) -> StoreResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(hash.as_phc_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_email(&self, user_id: &UserId, email: &Email) -> StoreResult<()> {
        sqlx::query("UPDATE users SET email = $2, updated_at = now() WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(email.as_str())
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        Ok(())
    }

    async fn update_username(&self, user_id: &UserId, username: &Username) -> StoreResult<()> {
        let affected = sqlx::query(
            "UPDATE users SET username = $2, updated_at = now() WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .bind(username.as_str())
        .execute(&self.pool)
        .await
        .map_err(classify)?
        .rows_affected();

        if affected != 1 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

/// Pick the duplicate kind from the constraint that fired
fn classify(err: sqlx::Error) -> StoreError {
    match violated_unique_constraint(&err) {
        Some(EMAIL_CONSTRAINT) => StoreError::DuplicateEmail,
        Some(USERNAME_CONSTRAINT) => StoreError::DuplicateUsername,
        Some(other) => {
            tracing::error!(constraint = other, "Unexpected unique constraint violation");
            StoreError::Unavailable(err)
        }
        None => StoreError::Unavailable(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> StoreResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| StoreError::Unavailable(sqlx::Error::Decode(Box::new(e))))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            username: Username::from_db(self.username),
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
