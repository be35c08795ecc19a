//! User Repository

use super::{RepoError, RepoResult};
use crate::auth::password::{hash_password, verify_password};
use shared::error::{AppError, ErrorCode};
use shared::models::{User, UserUpdate};
use shared::util::normalize_email;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, email, name, password_hash, is_active, is_staff, is_superuser, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Lookup by email, normalizing the domain first
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let email = normalize_email(email);
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Create an active regular user
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    name: &str,
) -> RepoResult<User> {
    insert(pool, email, password, name, false).await
}

/// Create an active user with staff and superuser flags set
pub async fn create_superuser(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    name: &str,
) -> RepoResult<User> {
    insert(pool, email, password, name, true).await
}

async fn insert(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    name: &str,
    admin: bool,
) -> RepoResult<User> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(RepoError::Validation(AppError::field(
            ErrorCode::EmailRequired,
            "email",
        )));
    }
    if find_by_email(pool, &email).await?.is_some() {
        return Err(email_taken());
    }

    let password_hash = hash(password)?;
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO user (email, name, password_hash, is_active, is_staff, is_superuser, created_at, updated_at) VALUES (?1, ?2, ?3, 1, ?4, ?4, ?5, ?5) RETURNING id",
    )
    .bind(&email)
    .bind(name)
    .bind(&password_hash)
    .bind(admin)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(unique_email)?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Apply the present fields; a new password is re-hashed
pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let email = data.email.as_deref().map(normalize_email);
    if let Some(email) = &email
        && let Some(other) = find_by_email(pool, email).await?
        && other.id != id
    {
        return Err(email_taken());
    }

    let password_hash = data.password.as_deref().map(hash).transpose()?;
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE user SET email = COALESCE(?1, email), name = COALESCE(?2, name), password_hash = COALESCE(?3, password_hash), updated_at = ?4 WHERE id = ?5",
    )
    .bind(email)
    .bind(data.name)
    .bind(password_hash)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .map_err(unique_email)?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// `Some(user)` when the credentials match an active account
pub async fn authenticate(pool: &SqlitePool, email: &str, password: &str) -> RepoResult<Option<User>> {
    let Some(user) = find_by_email(pool, email).await? else {
        return Ok(None);
    };
    if !user.is_active || !verify_password(password, &user.password_hash) {
        return Ok(None);
    }
    Ok(Some(user))
}

fn hash(password: &str) -> RepoResult<String> {
    hash_password(password).map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))
}

fn email_taken() -> RepoError {
    RepoError::Validation(AppError::field(ErrorCode::EmailAlreadyExists, "email"))
}

/// A racing insert can still trip the UNIQUE index
fn unique_email(err: sqlx::Error) -> RepoError {
    match RepoError::from(err) {
        RepoError::Duplicate(_) => email_taken(),
        other => other,
    }
}
