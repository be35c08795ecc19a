//! Authentication
//!
//! Opaque token authentication and password hashing:
//! - [`password`] - argon2 hashing and verification
//! - [`token`] - token generation and `Authorization` header parsing
//! - [`CurrentUser`] - the authenticated caller
//! - [`require_auth`] - middleware guarding every non-public `/api` route

pub mod extractor;
pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::require_auth;

use shared::models::User;

/// The authenticated caller, injected into request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self { id: user.id }
    }
}
