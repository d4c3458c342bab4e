use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    grocery::entities::{GroceryList, GroceryListItem},
    ingredients::entities::ExtractedIngredient,
};

pub const DEFAULT_GROCERY_LIST_NAME: &str = "Shopping list";

#[derive(Debug, Clone, PartialEq)]
pub struct CreateGroceryListInput {
    /// Only used when a new list has to be created.
    pub name: Option<String>,
    pub ingredients: Vec<ExtractedIngredient>,
    pub source_recipe_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroceryListWithItems {
    pub list: GroceryList,
    /// Items appended by this call.
    pub items: Vec<GroceryListItem>,
}
