//! Music Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type MusicResult<T> = Result<T, MusicError>;

#[derive(Debug, Error)]
pub enum MusicError {
    /// Anonymous caller on an operation that needs an identity
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Album missing or owned by someone else
    #[error("Album not found")]
    AlbumNotFound,

    #[error("Upload URL could not be created: {0}")]
    Presign(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl MusicError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        MusicError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MusicError::Unauthorized => ErrorKind::Unauthorized,
            MusicError::Validation { .. } => ErrorKind::BadRequest,
            MusicError::AlbumNotFound => ErrorKind::NotFound,
            MusicError::Presign(_) => ErrorKind::BadGateway,
            MusicError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            MusicError::Database(e) => AppError::from(e),
            MusicError::Presign(_) => AppError::new(ErrorKind::BadGateway, "Storage unavailable")
                .with_action("Try again later"),
            MusicError::Unauthorized => {
                AppError::unauthorized("Authentication required").with_action("Please log in")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for MusicError {
    fn into_response(self) -> Response {
        match &self {
            MusicError::Database(e) => tracing::error!(error = %e, "Music database error"),
            MusicError::Presign(msg) => tracing::error!(message = %msg, "Presign failed"),
            _ => tracing::debug!(error = %self, "Music request rejected"),
        }
        self.into_app_error().into_response()
    }
}
