//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::UserInfo;
use crate::domain::entity::user::User;

// ============================================================================
// Register / Login
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
}

// ============================================================================
// Account
// ============================================================================

/// Public view of an account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            email: user.email.to_string(),
            username: user.username.to_string(),
        }
    }
}

/// `GET /me` body; `authenticated: false` for anonymous callers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub authenticated: bool,
    pub user: Option<UserResponse>,
}

impl From<UserInfo> for UserResponse {
    fn from(info: UserInfo) -> Self {
        Self {
            user_id: info.user_id.to_string(),
            email: info.email,
            username: info.username,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequest {
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsernameRequest {
    pub username: String,
}
