//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, username::Username};

/// Stored user account
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    pub username: Username,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account about to be inserted
///
/// Only validated values and an already-hashed password can reach the store.
#[derive(Debug)]
pub struct NewUser {
    pub user_id: UserId,
    pub email: Email,
    pub username: Username,
    pub password_hash: HashedPassword,
}

impl NewUser {
    pub fn new(email: Email, username: Username, password_hash: HashedPassword) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            username,
            password_hash,
        }
    }

    /// Materialize the stored row, stamping both timestamps with `now`
    #[cfg(test)]
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            user_id: self.user_id,
            email: self.email,
            username: self.username,
            password_hash: self.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
