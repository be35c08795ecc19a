//! Recipe API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use http::StatusCode;
use serde::Deserialize;

use crate::api::parse_id_list;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::db::repository::recipe::{self, RecipeFilter, RecipeWithRelations};
use crate::services::MediaStorage;
use crate::utils::validation::{FieldErrors, MAX_LINK_LEN, MAX_NAME_LEN};
use crate::utils::{ApiJson, ApiPath, AppError, AppResult, ErrorCode};
use shared::models::{RecipeDetail, RecipeSummary, RecipeUpdate};

/// `?tags=1,2&ingredients=3`
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    pub tags: Option<String>,
    pub ingredients: Option<String>,
}

fn to_summary(r: RecipeWithRelations) -> RecipeSummary {
    RecipeSummary {
        id: r.recipe.id,
        title: r.recipe.title,
        time_minutes: r.recipe.time_minutes,
        price: r.recipe.price,
        link: r.recipe.link,
        tags: r.tags,
        ingredients: r.ingredients,
    }
}

fn to_detail(mut r: RecipeWithRelations) -> RecipeDetail {
    let description = std::mem::take(&mut r.recipe.description);
    let image = r.recipe.image.take().map(|path| MediaStorage::url_for(&path));
    RecipeDetail {
        summary: to_summary(r),
        description,
        image,
    }
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::RecipeNotFound, format!("Recipe {id} not found"))
}

/// Field checks shared by create, replace and partial update
///
/// Unless `partial`, `title`, `time_minutes` and `price` must be present.
fn validate(data: &RecipeUpdate, partial: bool) -> AppResult<()> {
    let mut errors = FieldErrors::new();

    if partial {
        errors.optional_nonblank(data.title.as_deref(), "title", MAX_NAME_LEN);
    } else {
        errors.required_option(data.title.as_deref(), "title", MAX_NAME_LEN);
        errors.present(data.time_minutes.as_ref(), "time_minutes");
        errors.present(data.price.as_ref(), "price");
    }
    if let Some(minutes) = data.time_minutes {
        errors.non_negative(minutes, "time_minutes");
    }
    if let Some(price) = &data.price {
        errors.price(price, "price");
    }
    errors.optional_text(data.link.as_deref(), "link", MAX_LINK_LEN);

    for t in data.tags.iter().flatten() {
        errors.required_text(&t.name, "tags", MAX_NAME_LEN);
    }
    for i in data.ingredients.iter().flatten() {
        errors.required_text(&i.name, "ingredients", MAX_NAME_LEN);
    }

    errors.into_result()
}

/// GET /api/recipe/recipes
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<RecipeListQuery>,
) -> AppResult<Json<Vec<RecipeSummary>>> {
    let filter = RecipeFilter {
        tags: parse_id_list(query.tags.as_deref(), "tags")?,
        ingredients: parse_id_list(query.ingredients.as_deref(), "ingredients")?,
    };

    let recipes = recipe::find_all(&state.pool, current_user.id, &filter).await?;
    let recipes = recipe::with_relations(&state.pool, recipes).await?;
    Ok(Json(recipes.into_iter().map(to_summary).collect()))
}

/// GET /api/recipe/recipes/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<RecipeDetail>> {
    let r = recipe::find_detail(&state.pool, current_user.id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(to_detail(r)))
}

/// POST /api/recipe/recipes
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiJson(payload): ApiJson<RecipeUpdate>,
) -> AppResult<(StatusCode, Json<RecipeDetail>)> {
    validate(&payload, false)?;
    let data = payload
        .into_create()
        .ok_or_else(|| AppError::validation("Missing required recipe fields"))?;

    let r = recipe::create(&state.pool, current_user.id, data).await?;
    tracing::info!(
        recipe_id = r.recipe.id,
        user_id = current_user.id,
        title = %r.recipe,
        "Recipe created"
    );

    Ok((StatusCode::CREATED, Json(to_detail(r))))
}

/// PUT /api/recipe/recipes/{id}
pub async fn replace(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<RecipeUpdate>,
) -> AppResult<Json<RecipeDetail>> {
    save(&state, &current_user, id, payload, false).await
}

/// PATCH /api/recipe/recipes/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<RecipeUpdate>,
) -> AppResult<Json<RecipeDetail>> {
    save(&state, &current_user, id, payload, true).await
}

async fn save(
    state: &ServerState,
    current_user: &CurrentUser,
    id: i64,
    payload: RecipeUpdate,
    partial: bool,
) -> AppResult<Json<RecipeDetail>> {
    // Ownership before field checks: a foreign recipe is always a 404
    if recipe::find_by_id(&state.pool, current_user.id, id).await?.is_none() {
        return Err(not_found(id));
    }
    validate(&payload, partial)?;

    let r = recipe::update(&state.pool, current_user.id, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => not_found(id),
            other => other.into(),
        })?;
    tracing::info!(recipe_id = id, user_id = current_user.id, "Recipe updated");

    Ok(Json(to_detail(r)))
}

/// DELETE /api/recipe/recipes/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    let removed = recipe::delete(&state.pool, current_user.id, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(image) = &removed.image {
        state.media.remove(image).await;
    }
    tracing::info!(recipe_id = id, user_id = current_user.id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}
