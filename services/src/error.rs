use crate::media::MediaError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a service operation.
///
/// The first group of variants carries a message meant for the caller. The
/// last group wraps collaborator failures whose details must only be logged.
#[derive(Debug, Error)]
pub enum AppError {
    /// Payload failed its schema; holds the first field message.
    #[error("{0}")]
    Validation(String),

    /// A required upload was not attached.
    #[error("{0}")]
    MissingAttachment(&'static str),

    /// The request could not be read (malformed multipart, unexpected field).
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    /// The caller's role does not permit the action.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("media host error: {0}")]
    Media(#[from] MediaError),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// Any other failure outside the caller's control.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// True for failures caused by a collaborator rather than by the caller.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Database(_)
                | AppError::Media(_)
                | AppError::PasswordHash(_)
                | AppError::Internal(_)
        )
    }
}
