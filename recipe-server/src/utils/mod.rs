//! Utilities - shared helpers and type re-exports
//!
//! - [`AppError`] / [`ApiResponse`] (from shared::error)
//! - [`ApiJson`] - JSON extractor that reports body errors as 400
//! - [`ApiPath`] - path extractor that reports unparseable ids as 404
//! - logging and input validation

pub mod error;
pub mod json;
pub mod logger;
pub mod path;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use json::ApiJson;
pub use path::ApiPath;
