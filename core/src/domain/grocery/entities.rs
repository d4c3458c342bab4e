use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    ingredients::entities::{ExtractedIngredient, IngredientCategory},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroceryListStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

impl GroceryListStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GroceryListStatus::Draft => "draft",
            GroceryListStatus::Active => "active",
            GroceryListStatus::Completed => "completed",
            GroceryListStatus::Archived => "archived",
        }
    }

    /// Draft and active lists still receive new items.
    pub fn is_open(&self) -> bool {
        matches!(self, GroceryListStatus::Draft | GroceryListStatus::Active)
    }
}

impl From<&str> for GroceryListStatus {
    fn from(s: &str) -> Self {
        match s {
            "active" => GroceryListStatus::Active,
            "completed" => GroceryListStatus::Completed,
            "archived" => GroceryListStatus::Archived,
            _ => GroceryListStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroceryList {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub status: GroceryListStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroceryList {
    pub fn new(user_id: Uuid, name: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            name,
            status: GroceryListStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A checked item means the user already owns the ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroceryListItem {
    pub id: Uuid,
    pub grocery_list_id: Uuid,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: IngredientCategory,
    pub is_optional: bool,
    pub is_checked: bool,
    pub source_recipe_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl GroceryListItem {
    pub fn from_ingredient(
        grocery_list_id: Uuid,
        ingredient: ExtractedIngredient,
        source_recipe_id: Option<Uuid>,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            grocery_list_id,
            name: ingredient.name.trim().to_string(),
            quantity: ingredient.quantity,
            unit: ingredient.unit.filter(|u| !u.trim().is_empty()),
            category: ingredient.category,
            is_optional: ingredient.optional,
            is_checked: false,
            source_recipe_id,
            created_at: now,
        }
    }
}
