// src/error.rs

use thiserror::Error;

/// Global Application Error Enum.
/// Every fallible gradebook operation returns this type, so callers can tell
/// "data is broken" apart from "database is down".
#[derive(Debug, Error)]
pub enum AppError {
    /// The store failed to execute a query. Never retried here.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A submission was selected but its grade rows do not cover the exercise.
    #[error(
        "submission {submission_id} is inconsistent: expected {expected} grades, found {found}"
    )]
    InconsistentSubmission {
        submission_id: i64,
        expected: usize,
        found: usize,
    },

    #[error("not found: {0}")]
    NotFound(String),

    // Input rejected by validation
    #[error("bad request: {0}")]
    BadRequest(String),

    // e.g., duplicate exercise id
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    InternalServerError(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
