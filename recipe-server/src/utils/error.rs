//! Unified error handling
//!
//! Re-exports the shared error system and adds the conversions from the
//! server's own failure types.
//!
//! ```ignore
//! Err(AppError::new(ErrorCode::RecipeNotFound))
//!
//! Err(AppError::validation("Validation failed").with_field_error("title", "This field is required."))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use axum::extract::multipart::MultipartError;

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(err) => err,
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::database("Database error")
            }
        }
    }
}

/// Convert multipart parse failures into a 400
pub fn multipart_error(err: MultipartError) -> AppError {
    AppError::with_message(
        ErrorCode::InvalidRequest,
        format!("Invalid multipart request: {}", err.body_text()),
    )
}
