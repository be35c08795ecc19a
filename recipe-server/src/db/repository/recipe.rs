//! Recipe Repository
//!
//! Recipes are always addressed through their owner: a recipe belonging to
//! someone else behaves exactly like a missing one.

use std::str::FromStr;

use super::{RepoError, RepoResult, ingredient, tag};
use crate::utils::validation::normalize_price;
use rust_decimal::Decimal;
use shared::models::{
    Ingredient, IngredientCreate, Recipe, RecipeCreate, RecipeUpdate, Tag, TagCreate,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const COLUMNS: &str = "r.id, r.user_id, r.title, r.time_minutes, r.price, r.description, r.link, r.image, r.created_at, r.updated_at";

/// `recipe` row as stored; price is TEXT
#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    user_id: i64,
    title: String,
    time_minutes: i32,
    price: String,
    description: String,
    link: String,
    image: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = RepoError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(&row.price).map_err(|e| {
            RepoError::Database(format!("Recipe {} has malformed price {:?}: {e}", row.id, row.price))
        })?;
        Ok(Recipe {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            time_minutes: row.time_minutes,
            price,
            description: row.description,
            link: row.link,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// List filters; an empty list means "no filter"
///
/// Within one list any id matches, across lists all must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub tags: Vec<i64>,
    pub ingredients: Vec<i64>,
}

/// A recipe with its associations loaded
#[derive(Debug, Clone)]
pub struct RecipeWithRelations {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

/// Owner's recipes, newest first, each at most once
pub async fn find_all(
    pool: &SqlitePool,
    user_id: i64,
    filter: &RecipeFilter,
) -> RepoResult<Vec<Recipe>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT DISTINCT {COLUMNS} FROM recipe r"));
    if !filter.tags.is_empty() {
        qb.push(" JOIN recipe_tag rt ON rt.recipe_id = r.id");
    }
    if !filter.ingredients.is_empty() {
        qb.push(" JOIN recipe_ingredient ri ON ri.recipe_id = r.id");
    }
    qb.push(" WHERE r.user_id = ").push_bind(user_id);
    push_in(&mut qb, "rt.tag_id", &filter.tags);
    push_in(&mut qb, "ri.ingredient_id", &filter.ingredients);
    qb.push(" ORDER BY r.id DESC");

    let rows: Vec<RecipeRow> = qb.build_query_as().fetch_all(pool).await?;
    rows.into_iter().map(Recipe::try_from).collect()
}

fn push_in(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, ids: &[i64]) {
    if ids.is_empty() {
        return;
    }
    qb.push(format!(" AND {column} IN ("));
    let mut sep = qb.separated(", ");
    for id in ids {
        sep.push_bind(*id);
    }
    sep.push_unseparated(")");
}

pub async fn find_by_id(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<Option<Recipe>> {
    let row = sqlx::query_as::<_, RecipeRow>(&format!(
        "SELECT {COLUMNS} FROM recipe r WHERE r.id = ? AND r.user_id = ?"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    row.map(Recipe::try_from).transpose()
}

/// Attach tags and ingredients, keeping the input order
pub async fn with_relations(
    pool: &SqlitePool,
    recipes: Vec<Recipe>,
) -> RepoResult<Vec<RecipeWithRelations>> {
    let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
    let mut tags = tag::find_for_recipes(pool, &ids).await?;
    let mut ingredients = ingredient::find_for_recipes(pool, &ids).await?;

    Ok(recipes
        .into_iter()
        .map(|recipe| RecipeWithRelations {
            tags: tags.remove(&recipe.id).unwrap_or_default(),
            ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
            recipe,
        })
        .collect())
}

/// Single recipe with associations, `None` when missing or foreign
pub async fn find_detail(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> RepoResult<Option<RecipeWithRelations>> {
    let Some(recipe) = find_by_id(pool, user_id, id).await? else {
        return Ok(None);
    };
    Ok(with_relations(pool, vec![recipe]).await?.pop())
}

/// Insert the recipe and resolve its nested tags and ingredients atomically
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    data: RecipeCreate,
) -> RepoResult<RecipeWithRelations> {
    let now = shared::util::now_millis();
    let price = normalize_price(data.price).to_string();

    let mut tx = pool.begin().await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO recipe (user_id, title, time_minutes, price, description, link, image, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7, ?7) RETURNING id",
    )
    .bind(user_id)
    .bind(&data.title)
    .bind(data.time_minutes)
    .bind(price)
    .bind(data.description.unwrap_or_default())
    .bind(data.link.unwrap_or_default())
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    reconcile(&mut tx, user_id, id, data.tags.as_deref(), data.ingredients.as_deref()).await?;

    tx.commit().await?;

    find_detail(pool, user_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create recipe".into()))
}

/// Apply present fields; present tag/ingredient lists replace the old ones
pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    data: RecipeUpdate,
) -> RepoResult<RecipeWithRelations> {
    let now = shared::util::now_millis();
    let price = data.price.map(|p| normalize_price(p).to_string());

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE recipe SET title = COALESCE(?1, title), time_minutes = COALESCE(?2, time_minutes), price = COALESCE(?3, price), description = COALESCE(?4, description), link = COALESCE(?5, link), updated_at = ?6 WHERE id = ?7 AND user_id = ?8",
    )
    .bind(data.title)
    .bind(data.time_minutes)
    .bind(price)
    .bind(data.description)
    .bind(data.link)
    .bind(now)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Recipe {id} not found")));
    }

    reconcile(&mut tx, user_id, id, data.tags.as_deref(), data.ingredients.as_deref()).await?;

    tx.commit().await?;

    find_detail(pool, user_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Recipe {id} not found")))
}

/// Resolve names to the owner's entries (creating missing ones) and
/// replace the links. `None` leaves the association untouched.
async fn reconcile(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    user_id: i64,
    recipe_id: i64,
    tags: Option<&[TagCreate]>,
    ingredients: Option<&[IngredientCreate]>,
) -> RepoResult<()> {
    if let Some(tags) = tags {
        let mut resolved = Vec::with_capacity(tags.len());
        for t in tags {
            resolved.push(tag::get_or_create(&mut **tx, user_id, t.name.trim()).await?);
        }
        tag::set_for_recipe(&mut **tx, recipe_id, &resolved).await?;
    }
    if let Some(ingredients) = ingredients {
        let mut resolved = Vec::with_capacity(ingredients.len());
        for i in ingredients {
            resolved.push(ingredient::get_or_create(&mut **tx, user_id, i.name.trim()).await?);
        }
        ingredient::set_for_recipe(&mut **tx, recipe_id, &resolved).await?;
    }
    Ok(())
}

/// Store the media-relative image path, `false` when missing or foreign
pub async fn set_image(pool: &SqlitePool, user_id: i64, id: i64, image: &str) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE recipe SET image = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4")
        .bind(image)
        .bind(shared::util::now_millis())
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete and return the removed recipe; links cascade, tags and ingredients stay
pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<Option<Recipe>> {
    let Some(recipe) = find_by_id(pool, user_id, id).await? else {
        return Ok(None);
    };
    sqlx::query("DELETE FROM recipe WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(Some(recipe))
}
