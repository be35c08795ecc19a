//! Per-user name catalogs (tags, ingredients)
//!
//! Both tables share one shape: `(id, user_id, name)` plus a link table to
//! `recipe`. The queries live here once; `tag` and `ingredient` bind them
//! to concrete types.

use std::collections::HashMap;

use super::RepoResult;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

/// A catalog table and its recipe link table
pub trait CatalogEntity: Send + Unpin + Sized {
    const TABLE: &'static str;
    const LINK_TABLE: &'static str;
    const LINK_COLUMN: &'static str;

    fn from_parts(id: i64, user_id: i64, name: String) -> Self;
    fn id(&self) -> i64;
}

type Row = (i64, i64, String);

fn build<T: CatalogEntity>(rows: Vec<Row>) -> Vec<T> {
    rows.into_iter()
        .map(|(id, user_id, name)| T::from_parts(id, user_id, name))
        .collect()
}

/// Owner's entries, name descending
///
/// `assigned_only` keeps entries linked to at least one recipe, each once.
pub async fn find_all<T: CatalogEntity>(
    pool: &SqlitePool,
    user_id: i64,
    assigned_only: bool,
) -> RepoResult<Vec<T>> {
    let sql = if assigned_only {
        format!(
            "SELECT DISTINCT c.id, c.user_id, c.name FROM {table} c JOIN {link} l ON l.{col} = c.id WHERE c.user_id = ? ORDER BY c.name DESC, c.id DESC",
            table = T::TABLE,
            link = T::LINK_TABLE,
            col = T::LINK_COLUMN,
        )
    } else {
        format!(
            "SELECT id, user_id, name FROM {} WHERE user_id = ? ORDER BY name DESC, id DESC",
            T::TABLE
        )
    };
    let rows = sqlx::query_as::<_, Row>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(build(rows))
}

pub async fn find_by_id<T: CatalogEntity>(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> RepoResult<Option<T>> {
    let row = sqlx::query_as::<_, Row>(&format!(
        "SELECT id, user_id, name FROM {} WHERE id = ? AND user_id = ?",
        T::TABLE
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, user_id, name)| T::from_parts(id, user_id, name)))
}

/// `None` when the entry does not exist for this owner
pub async fn rename<T: CatalogEntity>(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    name: &str,
) -> RepoResult<Option<T>> {
    let rows = sqlx::query(&format!(
        "UPDATE {} SET name = ? WHERE id = ? AND user_id = ?",
        T::TABLE
    ))
    .bind(name)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, user_id, id).await
}

/// Link rows go with the entry (ON DELETE CASCADE)
pub async fn delete<T: CatalogEntity>(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(&format!(
        "DELETE FROM {} WHERE id = ? AND user_id = ?",
        T::TABLE
    ))
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Oldest entry with exactly this name, or a new one
pub async fn get_or_create<T: CatalogEntity>(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> RepoResult<T> {
    let existing = sqlx::query_as::<_, Row>(&format!(
        "SELECT id, user_id, name FROM {} WHERE user_id = ? AND name = ? ORDER BY id LIMIT 1",
        T::TABLE
    ))
    .bind(user_id)
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    if let Some((id, user_id, name)) = existing {
        return Ok(T::from_parts(id, user_id, name));
    }

    let id = sqlx::query_scalar::<_, i64>(&format!(
        "INSERT INTO {} (user_id, name) VALUES (?, ?) RETURNING id",
        T::TABLE
    ))
    .bind(user_id)
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;
    Ok(T::from_parts(id, user_id, name.to_string()))
}

/// Entries linked to each of `recipe_ids`, keyed by recipe, id ascending
pub async fn find_for_recipes<T: CatalogEntity>(
    pool: &SqlitePool,
    recipe_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<T>>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    if recipe_ids.is_empty() {
        return Ok(grouped);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT l.recipe_id, c.id, c.user_id, c.name FROM {table} c JOIN {link} l ON l.{col} = c.id WHERE l.recipe_id IN (",
        table = T::TABLE,
        link = T::LINK_TABLE,
        col = T::LINK_COLUMN,
    ));
    let mut ids = qb.separated(", ");
    for id in recipe_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY c.id");

    let rows: Vec<(i64, i64, i64, String)> = qb.build_query_as().fetch_all(pool).await?;
    for (recipe_id, id, user_id, name) in rows {
        grouped
            .entry(recipe_id)
            .or_default()
            .push(T::from_parts(id, user_id, name));
    }
    Ok(grouped)
}

/// Replace the recipe's links with `items`; repeats collapse to one link
pub async fn set_for_recipe<T: CatalogEntity>(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    items: &[T],
) -> RepoResult<()> {
    sqlx::query(&format!("DELETE FROM {} WHERE recipe_id = ?", T::LINK_TABLE))
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    let insert = format!(
        "INSERT OR IGNORE INTO {} (recipe_id, {}) VALUES (?, ?)",
        T::LINK_TABLE,
        T::LINK_COLUMN
    );
    for item in items {
        sqlx::query(&insert)
            .bind(recipe_id)
            .bind(item.id())
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
