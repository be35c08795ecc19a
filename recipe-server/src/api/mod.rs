//! API routes
//!
//! | Module | Prefix | Auth |
//! |--------|--------|------|
//! | [`health`] | `/api/health` | public |
//! | [`user`] | `/api/user` | create/token public, `me` token |
//! | [`recipes`] | `/api/recipe/recipes` | token |
//! | [`tags`] | `/api/recipe/tags` | token |
//! | [`ingredients`] | `/api/recipe/ingredients` | token |
//! | [`media`] | `/media` | public |

pub mod health;
pub mod ingredients;
pub mod media;
pub mod recipes;
pub mod tags;
pub mod user;

use http::Method;

use crate::utils::{AppError, AppResult};

/// Fallback for methods a route does not expose
pub(crate) async fn method_not_allowed(method: Method) -> AppError {
    AppError::method_not_allowed(method)
}

/// Parse a comma-separated id list such as `1,2,3`
///
/// An absent or empty value means no filter.
pub(crate) fn parse_id_list(value: Option<&str>, field: &str) -> AppResult<Vec<i64>> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(Vec::new());
    };
    value
        .split(',')
        .map(|part| {
            part.trim().parse::<i64>().map_err(|_| {
                AppError::validation(format!("Invalid {field} filter"))
                    .with_field_error(field, format!("'{part}' is not a valid integer."))
            })
        })
        .collect()
}

/// Parse an integer flag such as `assigned_only=1`; absent means 0
pub(crate) fn parse_int_flag(value: Option<&str>, field: &str) -> AppResult<i64> {
    match value {
        None => Ok(0),
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            AppError::validation(format!("Invalid {field} parameter"))
                .with_field_error(field, "A valid integer is required.")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list(None, "tags").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_id_list(Some(""), "tags").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_id_list(Some("1,2, 3"), "tags").unwrap(), vec![1, 2, 3]);

        let err = parse_id_list(Some("1,abc"), "tags").unwrap_err();
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        assert!(err.details.unwrap().contains_key("tags"));
    }

    #[test]
    fn test_parse_int_flag() {
        assert_eq!(parse_int_flag(None, "assigned_only").unwrap(), 0);
        assert_eq!(parse_int_flag(Some("1"), "assigned_only").unwrap(), 1);
        assert_eq!(parse_int_flag(Some("0"), "assigned_only").unwrap(), 0);
        assert!(parse_int_flag(Some("yes"), "assigned_only").is_err());
        assert!(parse_int_flag(Some(""), "assigned_only").is_err());
    }
}
