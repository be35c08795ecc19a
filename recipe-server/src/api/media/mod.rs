//! Media Routes
//!
//! Serves uploaded recipe images. Public, like any static file.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use http::header;

use crate::core::ServerState;
use crate::services::media::RECIPE_IMAGE_DIR;

enum MediaFileResponse {
    Ok { content: Bytes, content_type: String },
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for MediaFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            MediaFileResponse::Ok {
                content,
                content_type,
            } => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            MediaFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            MediaFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// GET /media/uploads/recipe/{filename}
async fn serve_recipe_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> MediaFileResponse {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return MediaFileResponse::BadRequest("Invalid filename");
    }

    let relative = format!("{RECIPE_IMAGE_DIR}/{filename}");
    match state.media.read(&relative).await {
        Ok(content) => MediaFileResponse::Ok {
            content: content.into(),
            content_type: mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .to_string(),
        },
        Err(e) => {
            tracing::debug!(path = %relative, error = %e, "Media file not found");
            MediaFileResponse::NotFound
        }
    }
}

pub fn router() -> Router<ServerState> {
    Router::new().route(
        &format!("/media/{RECIPE_IMAGE_DIR}/{{filename}}"),
        get(serve_recipe_image),
    )
}
