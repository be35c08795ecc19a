//! Ingredient API

mod handler;

use axum::{Router, routing::get, routing::put};

use super::method_not_allowed;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/recipe/ingredients", routes())
}

/// List, rename and delete only; ingredients are created through recipes
fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).fallback(method_not_allowed))
        .route(
            "/{id}",
            put(handler::replace)
                .patch(handler::update)
                .delete(handler::delete)
                .fallback(method_not_allowed),
        )
}
