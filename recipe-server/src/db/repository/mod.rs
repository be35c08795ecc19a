//! Repository Module
//!
//! Free-function CRUD over the SQLite pool. Every query touching tags,
//! ingredients or recipes is scoped by the owning user id.

// Accounts
pub mod auth_token;
pub mod user;

// Catalog
mod catalog;
pub mod ingredient;
pub mod tag;

// Recipes
pub mod recipe;

pub use catalog::CatalogEntity;

use shared::error::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Rejected input, already shaped as a client error
    #[error("Validation error: {0}")]
    Validation(AppError),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
