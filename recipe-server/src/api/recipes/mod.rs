//! Recipe Routes
//!
//! | Path | Method |
//! |------|--------|
//! | /api/recipe/recipes | GET, POST |
//! | /api/recipe/recipes/{id} | GET, PUT, PATCH, DELETE |
//! | /api/recipe/recipes/{id}/upload-image | POST (multipart) |
//!
//! All routes require a token and only ever see the caller's recipes.

mod handler;
mod upload;

use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get, routing::post};

use super::method_not_allowed;
use crate::core::ServerState;

pub use upload::MAX_IMAGE_SIZE;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/recipe/recipes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::replace)
                .patch(handler::update)
                .delete(handler::delete)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}/upload-image",
            post(upload::upload_image)
                .fallback(method_not_allowed)
                // Oversized files must reach the handler to get a field error
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE * 2)),
        )
}
