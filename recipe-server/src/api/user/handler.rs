//! User Handlers
//!
//! Registration, token exchange and the caller's own profile

use axum::{Json, extract::State};
use http::StatusCode;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{auth_token, user};
use crate::security_log;
use crate::utils::validation::{FieldErrors, MAX_EMAIL_LEN, MAX_NAME_LEN};
use crate::utils::{ApiJson, AppError, AppResult, ErrorCode};
use shared::models::{TokenRequest, TokenResponse, UserCreate, UserProfile, UserUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Required {
    /// PATCH
    None,
    /// Registration: email and password
    Credentials,
    /// PUT
    All,
}

/// Checks present fields; `required` fields must also be present
fn validate_profile(
    email: Option<&str>,
    password: Option<&str>,
    name: Option<&str>,
    required: Required,
) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if required != Required::None {
        errors.present(email, "email");
        errors.present(password, "password");
    }
    if required == Required::All {
        errors.present(name, "name");
    }
    if let Some(email) = email {
        errors.email(email);
    }
    if let Some(password) = password {
        errors.password(password);
    }
    errors.optional_text(name, "name", MAX_NAME_LEN);
    errors.into_result()
}

fn validate_update(data: &UserUpdate, required: Required) -> AppResult<()> {
    validate_profile(
        data.email.as_deref(),
        data.password.as_deref(),
        data.name.as_deref(),
        required,
    )
}

/// POST /api/user/create
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<UserCreate>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    validate_profile(
        payload.email.as_deref(),
        payload.password.as_deref(),
        payload.name.as_deref(),
        Required::Credentials,
    )?;
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(AppError::validation("Email and password are required"));
    };
    let name = payload.name.unwrap_or_default();

    let created = user::create_user(&state.pool, &email, &password, &name).await?;

    security_log!("INFO", "user_registered", user_id = created.id);
    tracing::info!(user_id = created.id, email = %created.email, "User registered");

    Ok((StatusCode::CREATED, Json(UserProfile::from(created))))
}

/// POST /api/user/token
///
/// Same response for an unknown email, a wrong password and a disabled
/// account.
pub async fn token(
    State(state): State<ServerState>,
    ApiJson(req): ApiJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let mut errors = FieldErrors::new();
    errors.required_text(&req.email, "email", MAX_EMAIL_LEN);
    errors.non_empty(&req.password, "password");
    errors.into_result()?;

    let Some(account) = user::authenticate(&state.pool, &req.email, &req.password).await? else {
        security_log!("WARN", "login_failed", email = req.email.clone());
        return Err(AppError::invalid_credentials());
    };

    let key = auth_token::get_or_create(&state.pool, account.id).await?;
    security_log!("INFO", "login_success", user_id = account.id);

    Ok(Json(TokenResponse { token: key }))
}

/// GET /api/user/me
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserProfile>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(UserProfile::from(account)))
}

/// PATCH /api/user/me
pub async fn update_me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiJson(payload): ApiJson<UserUpdate>,
) -> AppResult<Json<UserProfile>> {
    validate_update(&payload, Required::None)?;
    let updated = user::update(&state.pool, current_user.id, payload).await?;
    Ok(Json(UserProfile::from(updated)))
}

/// PUT /api/user/me
pub async fn replace_me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiJson(payload): ApiJson<UserUpdate>,
) -> AppResult<Json<UserProfile>> {
    validate_update(&payload, Required::All)?;
    let updated = user::update(&state.pool, current_user.id, payload).await?;
    Ok(Json(UserProfile::from(updated)))
}
