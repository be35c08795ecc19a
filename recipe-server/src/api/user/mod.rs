//! User Routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/user/create | POST | none |
//! | /api/user/token | POST | none |
//! | /api/user/me | GET, PUT, PATCH | token |

mod handler;

use axum::{Router, routing::get, routing::post};

use super::method_not_allowed;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/user/create",
            post(handler::create).fallback(method_not_allowed),
        )
        .route(
            "/api/user/token",
            post(handler::token).fallback(method_not_allowed),
        )
        .route(
            "/api/user/me",
            get(handler::me)
                .put(handler::replace_me)
                .patch(handler::update_me)
                .fallback(method_not_allowed),
        )
}
