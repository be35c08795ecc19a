//! Ingredient API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use http::StatusCode;
use serde::Deserialize;

use crate::api::parse_int_flag;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::ingredient;
use crate::utils::validation::{FieldErrors, MAX_NAME_LEN};
use crate::utils::{ApiJson, ApiPath, AppError, AppResult, ErrorCode};
use shared::models::{Ingredient, IngredientUpdate};

#[derive(Debug, Default, Deserialize)]
pub struct IngredientListQuery {
    pub assigned_only: Option<String>,
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::IngredientNotFound, format!("Ingredient {id} not found"))
}

/// GET /api/recipe/ingredients - caller's ingredients, name descending
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<IngredientListQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let assigned_only = parse_int_flag(query.assigned_only.as_deref(), "assigned_only")? != 0;
    let ingredients = ingredient::find_all(&state.pool, current_user.id, assigned_only).await?;
    Ok(Json(ingredients))
}

/// PUT /api/recipe/ingredients/{id}
pub async fn replace(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<IngredientUpdate>,
) -> AppResult<Json<Ingredient>> {
    rename(&state, &current_user, id, payload, false).await
}

/// PATCH /api/recipe/ingredients/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<IngredientUpdate>,
) -> AppResult<Json<Ingredient>> {
    rename(&state, &current_user, id, payload, true).await
}

async fn rename(
    state: &ServerState,
    current_user: &CurrentUser,
    id: i64,
    payload: IngredientUpdate,
    partial: bool,
) -> AppResult<Json<Ingredient>> {
    let existing = ingredient::find_by_id(&state.pool, current_user.id, id)
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
    let renamed = ingredient::rename(&state.pool, current_user.id, id, name.trim())
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        ingredient_id = id,
        user_id = current_user.id,
        name = %renamed,
        "Ingredient renamed"
    );

    Ok(Json(renamed))
}

/// DELETE /api/recipe/ingredients/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    if !ingredient::delete(&state.pool, current_user.id, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(ingredient_id = id, user_id = current_user.id, "Ingredient deleted");
    Ok(StatusCode::NO_CONTENT)
}
