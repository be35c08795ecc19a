//! Ingredient Repository

use std::collections::HashMap;

use super::RepoResult;
use super::catalog::{self, CatalogEntity};
use shared::models::Ingredient;
use sqlx::{SqliteConnection, SqlitePool};

impl CatalogEntity for Ingredient {
    const TABLE: &'static str = "ingredient";
    const LINK_TABLE: &'static str = "recipe_ingredient";
    const LINK_COLUMN: &'static str = "ingredient_id";

    fn from_parts(id: i64, user_id: i64, name: String) -> Self {
        Ingredient { id, user_id, name }
    }

    fn id(&self) -> i64 {
        self.id
    }
}

pub async fn find_all(
    pool: &SqlitePool,
    user_id: i64,
    assigned_only: bool,
) -> RepoResult<Vec<Ingredient>> {
    catalog::find_all(pool, user_id, assigned_only).await
}

pub async fn find_by_id(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> RepoResult<Option<Ingredient>> {
    catalog::find_by_id(pool, user_id, id).await
}

pub async fn rename(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    name: &str,
) -> RepoResult<Option<Ingredient>> {
    catalog::rename(pool, user_id, id, name).await
}

pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<bool> {
    catalog::delete::<Ingredient>(pool, user_id, id).await
}

pub async fn get_or_create(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> RepoResult<Ingredient> {
    catalog::get_or_create(conn, user_id, name).await
}

pub async fn find_for_recipes(
    pool: &SqlitePool,
    recipe_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<Ingredient>>> {
    catalog::find_for_recipes(pool, recipe_ids).await
}

pub async fn set_for_recipe(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    ingredients: &[Ingredient],
) -> RepoResult<()> {
    catalog::set_for_recipe(conn, recipe_id, ingredients).await
}
