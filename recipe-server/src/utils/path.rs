//! Path parameter extractor
//!
//! Wraps [`axum::extract::Path`]. An id segment that does not parse names
//! no resource, so the rejection becomes a JSON 404 instead of axum's
//! plain-text 400.

use axum::extract::FromRequestParts;
use axum::extract::rejection::PathRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::{AppError, ErrorCode};

#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => {
            tracing::debug!(error = %e, "Unparseable path parameter");
            AppError::new(ErrorCode::NotFound)
        }
        other => AppError::with_message(ErrorCode::InternalError, other.body_text()),
    }
}
