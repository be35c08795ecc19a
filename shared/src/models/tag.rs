//! Tag Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag entity, owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    #[serde(skip_serializing, default)]
    pub user_id: i64,
    pub name: String,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Nested tag reference in a recipe payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
}

/// Update tag payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagUpdate {
    pub name: Option<String>,
}
