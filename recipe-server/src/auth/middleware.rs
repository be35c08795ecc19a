//! Authentication middleware
//!
//! Resolves the `Authorization` header to a [`CurrentUser`] for every
//! protected `/api` route.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;

use crate::AppError;
use crate::auth::{CurrentUser, token};
use crate::core::ServerState;
use crate::db::repository::auth_token;
use crate::security_log;
use crate::utils::ErrorCode;

/// Routes reachable without credentials
const PUBLIC_API_ROUTES: &[&str] = &["/api/user/create", "/api/user/token", "/api/health"];

/// Require a valid token
///
/// Accepts `Authorization: Token <key>` (and `Bearer <key>`). On success the
/// [`CurrentUser`] is inserted into request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (media files, unknown routes)
/// - registration, token exchange, health
///
/// # Errors
///
/// | Case | Status |
/// |------|--------|
/// | no header | 401 NotAuthenticated |
/// | malformed header or unknown key | 401 TokenInvalid |
/// | deactivated account | 401 AccountDisabled |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers(), req.uri()).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Resolve the caller from request headers
pub async fn authenticate(
    state: &ServerState,
    headers: &HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let key = match header {
        Some(header) => token::extract_from_header(header).ok_or_else(|| {
            security_log!("WARN", "auth_malformed", uri = uri.to_string());
            AppError::invalid_token("Invalid token header")
        })?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::not_authenticated());
        }
    };

    let Some(user) = auth_token::find_user_by_key(&state.pool, key).await? else {
        security_log!("WARN", "auth_failed", uri = uri.to_string());
        return Err(AppError::invalid_token("Invalid token"));
    };

    if !user.is_active {
        security_log!("WARN", "auth_inactive", user_id = user.id);
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    Ok(CurrentUser::from(&user))
}
