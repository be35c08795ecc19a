//! Recipe image upload
//!
//! Accepts PNG, JPEG and WebP up to 5MB in the multipart field `image`.
//! The bytes are stored as uploaded once they decode as an image.

use std::path::Path as FsPath;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::extract::multipart::MultipartError;
use http::StatusCode;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::recipe;
use crate::services::MediaStorage;
use crate::utils::error::multipart_error;
use crate::utils::{ApiPath, AppError, AppResult, ErrorCode};
use shared::models::RecipeImage;

/// Maximum file size (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

const FIELD: &str = "image";

fn image_error(code: ErrorCode, msg: impl Into<String>) -> AppError {
    AppError::new(code).with_field_error(FIELD, msg)
}

fn read_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large()
    } else {
        multipart_error(err)
    }
}

fn too_large() -> AppError {
    image_error(
        ErrorCode::FileTooLarge,
        format!(
            "File too large. Maximum size is {}MB.",
            MAX_IMAGE_SIZE / 1024 / 1024
        ),
    )
}

/// Lowercased extension from the client filename, else sniffed from the bytes
fn resolve_extension(filename: Option<&str>, data: &[u8]) -> Option<String> {
    let from_name = filename
        .and_then(|name| FsPath::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    from_name.or_else(|| {
        image::guess_format(data)
            .ok()
            .and_then(|format| format.extensions_str().first().map(|ext| ext.to_string()))
    })
}

/// Check size, extension and that the bytes decode
fn validate_image(data: &[u8], ext: Option<&str>) -> AppResult<String> {
    if data.is_empty() {
        return Err(AppError::field(ErrorCode::EmptyFile, FIELD));
    }
    if data.len() > MAX_IMAGE_SIZE {
        return Err(too_large());
    }

    let Some(ext) = ext else {
        return Err(AppError::field(ErrorCode::InvalidImageFile, FIELD));
    };
    if !SUPPORTED_FORMATS.contains(&ext) {
        return Err(image_error(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    if let Err(e) = image::load_from_memory(data) {
        tracing::debug!(error = %e, "Uploaded file does not decode as an image");
        return Err(AppError::field(ErrorCode::InvalidImageFile, FIELD));
    }

    Ok(ext.to_string())
}

/// POST /api/recipe/recipes/{id}/upload-image
pub async fn upload_image(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<RecipeImage>> {
    let existing = recipe::find_by_id(&state.pool, current_user.id, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::RecipeNotFound, format!("Recipe {id} not found"))
        })?;

    let mut upload: Option<(Option<String>, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() == Some(FIELD) {
            let filename = field.file_name().map(|s| s.to_string());
            let data = field.bytes().await.map_err(read_error)?;
            upload = Some((filename, data.to_vec()));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::field(ErrorCode::NoFileProvided, FIELD))?;
    let ext = resolve_extension(filename.as_deref(), &data);
    let ext = validate_image(&data, ext.as_deref())?;

    let relative = MediaStorage::recipe_image_file_path(&ext);
    state.media.save(&relative, &data).await.map_err(|e| {
        tracing::error!(path = %relative, error = %e, "Failed to store image");
        AppError::new(ErrorCode::FileStorageFailed)
    })?;

    if !recipe::set_image(&state.pool, current_user.id, id, &relative).await? {
        // Deleted while uploading
        state.media.remove(&relative).await;
        return Err(AppError::with_message(
            ErrorCode::RecipeNotFound,
            format!("Recipe {id} not found"),
        ));
    }

    if let Some(old) = existing.image.as_deref()
        && old != relative
    {
        state.media.remove(old).await;
    }

    tracing::info!(
        recipe_id = id,
        original_name = ?filename,
        size = data.len(),
        path = %relative,
        "Recipe image uploaded"
    );

    Ok(Json(RecipeImage {
        id,
        image: Some(MediaStorage::url_for(&relative)),
    }))
}
