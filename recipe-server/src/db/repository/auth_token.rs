//! Auth Token Repository
//!
//! One token per user, created on first exchange and reused afterwards.

use super::{RepoError, RepoResult};
use crate::auth::token::generate_key;
use shared::models::User;
use sqlx::SqlitePool;

/// The user's key, creating it on first use
pub async fn get_or_create(pool: &SqlitePool, user_id: i64) -> RepoResult<String> {
    if let Some(key) = find_key(pool, user_id).await? {
        return Ok(key);
    }

    sqlx::query("INSERT OR IGNORE INTO auth_token (key, user_id, created_at) VALUES (?, ?, ?)")
        .bind(generate_key())
        .bind(user_id)
        .bind(shared::util::now_millis())
        .execute(pool)
        .await?;

    // A concurrent exchange may have won the insert
    find_key(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Failed to create token for user {user_id}")))
}

async fn find_key(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<String>> {
    let key = sqlx::query_scalar::<_, String>("SELECT key FROM auth_token WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(key)
}

/// Owner of `key`, if any
pub async fn find_user_by_key(pool: &SqlitePool, key: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.id, u.email, u.name, u.password_hash, u.is_active, u.is_staff, u.is_superuser, u.created_at, u.updated_at FROM auth_token t JOIN user u ON u.id = t.user_id WHERE t.key = ?",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::user;

    #[tokio::test]
    async fn test_token_is_stable_per_user() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let alice = user::create_user(&pool, "alice@example.com", "testpass", "").await.unwrap();
        let bob = user::create_user(&pool, "bob@example.com", "testpass", "").await.unwrap();

        let first = get_or_create(&pool, alice.id).await.unwrap();
        let second = get_or_create(&pool, alice.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 40);

        let other = get_or_create(&pool, bob.id).await.unwrap();
        assert_ne!(first, other);
    }

    #[tokio::test]
    async fn test_find_user_by_key() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let alice = user::create_user(&pool, "alice@example.com", "testpass", "").await.unwrap();
        let key = get_or_create(&pool, alice.id).await.unwrap();

        let found = find_user_by_key(&pool, &key).await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);
        assert!(find_user_by_key(&pool, "nope").await.unwrap().is_none());
    }
}
