//! Recipe Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Ingredient, IngredientCreate, Tag, TagCreate};

/// Recipe entity
///
/// `price` is stored as TEXT and always carries two decimal places.
/// `image` is the path relative to the media root, if an image was uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
    pub link: String,
    pub image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// List projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

/// Detail projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub description: String,
    /// Public URL of the uploaded image
    pub image: Option<String>,
}

/// Validated input for a new recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<TagCreate>>,
    pub ingredients: Option<Vec<IngredientCreate>>,
}

/// Recipe payload as received (create, PUT and PATCH)
///
/// `tags` / `ingredients`: `None` leaves associations untouched, an empty
/// list clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<TagCreate>>,
    pub ingredients: Option<Vec<IngredientCreate>>,
}

impl RecipeUpdate {
    /// The create input, if `title`, `time_minutes` and `price` are all present
    pub fn into_create(self) -> Option<RecipeCreate> {
        Some(RecipeCreate {
            title: self.title?,
            time_minutes: self.time_minutes?,
            price: self.price?,
            description: self.description,
            link: self.link,
            tags: self.tags,
            ingredients: self.ingredients,
        })
    }
}

/// Response of the image upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeImage {
    pub id: i64,
    pub image: Option<String>,
}
