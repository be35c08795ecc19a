//! Tag Repository

use std::collections::HashMap;

use super::RepoResult;
use super::catalog::{self, CatalogEntity};
use shared::models::Tag;
use sqlx::{SqliteConnection, SqlitePool};

impl CatalogEntity for Tag {
    const TABLE: &'static str = "tag";
    const LINK_TABLE: &'static str = "recipe_tag";
    const LINK_COLUMN: &'static str = "tag_id";

    fn from_parts(id: i64, user_id: i64, name: String) -> Self {
        Tag { id, user_id, name }
    }

    fn id(&self) -> i64 {
        self.id
    }
}

pub async fn find_all(pool: &SqlitePool, user_id: i64, assigned_only: bool) -> RepoResult<Vec<Tag>> {
    catalog::find_all(pool, user_id, assigned_only).await
}

pub async fn find_by_id(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<Option<Tag>> {
    catalog::find_by_id(pool, user_id, id).await
}

pub async fn rename(pool: &SqlitePool, user_id: i64, id: i64, name: &str) -> RepoResult<Option<Tag>> {
    catalog::rename(pool, user_id, id, name).await
}

pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<bool> {
    catalog::delete::<Tag>(pool, user_id, id).await
}

pub async fn get_or_create(conn: &mut SqliteConnection, user_id: i64, name: &str) -> RepoResult<Tag> {
    catalog::get_or_create(conn, user_id, name).await
}

pub async fn find_for_recipes(
    pool: &SqlitePool,
    recipe_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<Tag>>> {
    catalog::find_for_recipes(pool, recipe_ids).await
}

pub async fn set_for_recipe(conn: &mut SqliteConnection, recipe_id: i64, tags: &[Tag]) -> RepoResult<()> {
    catalog::set_for_recipe(conn, recipe_id, tags).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::user;

    async fn setup() -> (SqlitePool, i64, i64) {
        let pool = DbService::in_memory().await.unwrap().pool;
        let alice = user::create_user(&pool, "alice@example.com", "testpass", "").await.unwrap();
        let bob = user::create_user(&pool, "bob@example.com", "testpass", "").await.unwrap();
        (pool, alice.id, bob.id)
    }

    async fn create(pool: &SqlitePool, user_id: i64, name: &str) -> Tag {
        let mut conn = pool.acquire().await.unwrap();
        get_or_create(&mut conn, user_id, name).await.unwrap()
    }

    #[tokio::test]
    async fn test_find_all_scoped_and_sorted_desc() {
        let (pool, alice, bob) = setup().await;
        create(&pool, alice, "Dessert").await;
        create(&pool, alice, "Vegan").await;
        create(&pool, bob, "Fruity").await;

        let tags = find_all(&pool, alice, false).await.unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Vegan", "Dessert"]);
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_by_exact_name() {
        let (pool, alice, bob) = setup().await;
        let first = create(&pool, alice, "Breakfast").await;
        let again = create(&pool, alice, "Breakfast").await;
        let other_case = create(&pool, alice, "breakfast").await;
        let other_user = create(&pool, bob, "Breakfast").await;

        assert_eq!(first.id, again.id);
        assert_ne!(first.id, other_case.id);
        assert_ne!(first.id, other_user.id);
        assert_eq!(other_user.user_id, bob);
    }

    #[tokio::test]
    async fn test_rename_and_delete_are_owner_scoped() {
        let (pool, alice, bob) = setup().await;
        let tag = create(&pool, alice, "After Dinner").await;

        assert!(rename(&pool, bob, tag.id, "Stolen").await.unwrap().is_none());
        let renamed = rename(&pool, alice, tag.id, "Dessert").await.unwrap().unwrap();
        assert_eq!(renamed.name, "Dessert");

        assert!(!delete(&pool, bob, tag.id).await.unwrap());
        assert!(delete(&pool, alice, tag.id).await.unwrap());
        assert!(find_by_id(&pool, alice, tag.id).await.unwrap().is_none());
    }
}
