//! Tag API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use http::StatusCode;
use serde::Deserialize;

use crate::api::parse_int_flag;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::tag;
use crate::utils::validation::{FieldErrors, MAX_NAME_LEN};
use crate::utils::{ApiJson, ApiPath, AppError, AppResult, ErrorCode};
use shared::models::{Tag, TagUpdate};

#[derive(Debug, Default, Deserialize)]
pub struct TagListQuery {
    pub assigned_only: Option<String>,
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::TagNotFound, format!("Tag {id} not found"))
}

/// GET /api/recipe/tags - caller's tags, name descending
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<TagListQuery>,
) -> AppResult<Json<Vec<Tag>>> {
    let assigned_only = parse_int_flag(query.assigned_only.as_deref(), "assigned_only")? != 0;
    let tags = tag::find_all(&state.pool, current_user.id, assigned_only).await?;
    Ok(Json(tags))
}

/// PUT /api/recipe/tags/{id}
pub async fn replace(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<TagUpdate>,
) -> AppResult<Json<Tag>> {
    rename(&state, &current_user, id, payload, false).await
}

/// PATCH /api/recipe/tags/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<TagUpdate>,
) -> AppResult<Json<Tag>> {
    rename(&state, &current_user, id, payload, true).await
}

async fn rename(
    state: &ServerState,
    current_user: &CurrentUser,
    id: i64,
    payload: TagUpdate,
    partial: bool,
) -> AppResult<Json<Tag>> {
    let existing = tag::find_by_id(&state.pool, current_user.id, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut errors = FieldErrors::new();
    if partial {
        errors.optional_nonblank(payload.name.as_deref(), "name", MAX_NAME_LEN);
    } else {
        errors.required_option(payload.name.as_deref(), "name", MAX_NAME_LEN);
    }
    errors.into_result()?;

    let Some(name) = payload.name else {
        return Ok(Json(existing));
    };
    let t = tag::rename(&state.pool, current_user.id, id, name.trim())
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(tag_id = id, user_id = current_user.id, name = %t, "Tag renamed");

    Ok(Json(t))
}

/// DELETE /api/recipe/tags/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    if !tag::delete(&state.pool, current_user.id, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(tag_id = id, user_id = current_user.id, "Tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
