//! Auth Error Types
//!
//! Closed set of failure kinds for the auth subsystem. Store and token
//! failures are folded into these at the service boundary; raw driver errors
//! only ever travel as `source` for logs.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::claims::TokenError;
use crate::domain::repository::StoreError;

pub type AuthResult<T> = Result<T, AuthError>;

/// Message shown for both unknown email and wrong password on login
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Input has the wrong shape (empty, too long, bad format)
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("User not found")]
    UserNotFound,

    /// Login password does not match the stored hash
    #[error("Invalid password")]
    InvalidPassword,

    /// Current password supplied to a password change does not match
    #[error("Current password does not match")]
    PasswordMismatch,

    /// Operation needs a verified identity and the request has none
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),
}

impl AuthError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AuthError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation { .. } => ErrorKind::BadRequest,
            AuthError::DuplicateEmail | AuthError::DuplicateUsername => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidPassword | AuthError::Unauthorized | AuthError::Token(_) => {
                ErrorKind::Unauthorized
            }
            AuthError::PasswordMismatch => ErrorKind::Forbidden,
            AuthError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
            AuthError::HashingFailure(_) => ErrorKind::InternalServerError,
        }
    }

    /// Caller-facing error
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::StoreUnavailable(e) => AppError::from(e),
            AuthError::HashingFailure(_) => AppError::internal("Internal error"),
            AuthError::Validation { .. } => {
                let message = self.to_string();
                AppError::bad_request(message)
            }
            AuthError::DuplicateEmail => AppError::conflict("Email is already registered")
                .with_action("Sign in instead, or register with another email"),
            AuthError::DuplicateUsername => AppError::conflict("Username is already taken")
                .with_action("Choose another username"),
            AuthError::Unauthorized | AuthError::Token(_) => {
                AppError::unauthorized("Authentication required").with_action("Please log in")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Login failures share one externally visible shape
    ///
    /// `UserNotFound` and `InvalidPassword` stay distinct internally (logs),
    /// but a client cannot tell which one happened.
    pub fn into_login_app_error(self) -> AppError {
        match self {
            AuthError::UserNotFound | AuthError::InvalidPassword => {
                AppError::unauthorized(LOGIN_FAILED_MESSAGE)
            }
            other => other.into_app_error(),
        }
    }

    fn log(&self) {
        match self {
            AuthError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Credential store error");
            }
            AuthError::HashingFailure(msg) => {
                tracing::error!(message = %msg, "Password hashing failed");
            }
            AuthError::PasswordMismatch => {
                tracing::warn!("Password change rejected: current password mismatch");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AuthError::UserNotFound,
            StoreError::DuplicateEmail => AuthError::DuplicateEmail,
            StoreError::DuplicateUsername => AuthError::DuplicateUsername,
            StoreError::Unavailable(e) => AuthError::StoreUnavailable(e),
        }
    }
}

/// Login response error that hides which credential was wrong
#[derive(Debug)]
pub struct LoginError(pub AuthError);

impl From<AuthError> for LoginError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        self.0.log();
        self.0.into_login_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_service_errors() {
        assert!(matches!(
            AuthError::from(StoreError::NotFound),
            AuthError::UserNotFound
        ));
        assert!(matches!(
            AuthError::from(StoreError::DuplicateEmail),
            AuthError::DuplicateEmail
        ));
        assert!(matches!(
            AuthError::from(StoreError::DuplicateUsername),
            AuthError::DuplicateUsername
        ));
        assert!(matches!(
            AuthError::from(StoreError::Unavailable(sqlx::Error::PoolTimedOut)),
            AuthError::StoreUnavailable(_)
        ));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::validation("email", "empty").kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::DuplicateEmail.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::PasswordMismatch.kind(), ErrorKind::Forbidden);
        assert_eq!(
            AuthError::Token(TokenError::Expired).kind(),
            ErrorKind::Unauthorized
        );
    }

    #[test]
    fn test_login_failures_look_identical() {
        let not_found = AuthError::UserNotFound.into_login_app_error();
        let bad_password = AuthError::InvalidPassword.into_login_app_error();

        assert_eq!(not_found.status_code(), bad_password.status_code());
        assert_eq!(not_found.message(), bad_password.message());
        assert_eq!(not_found.message(), LOGIN_FAILED_MESSAGE);
    }

    #[test]
    fn test_store_failure_hides_driver_message() {
        let err = AuthError::StoreUnavailable(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(err.status_code(), 503);
        assert!(!err.message().contains("pool timed out"));
    }
}
