use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::AppError;

/// Startup and serving failures
///
/// Request-level failures are [`AppError`]s; this type covers everything
/// that keeps the process from serving at all.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("database initialization failed: {0}")]
    Database(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::Database(err.message)
    }
}

impl From<RepoError> for ServerError {
    fn from(err: RepoError) -> Self {
        ServerError::Database(err.to_string())
    }
}

/// Result alias for startup code
pub type Result<T> = std::result::Result<T, ServerError>;
