use chrono::{TimeZone, Utc};
use sea_orm::ActiveValue::Set;

use crate::domain::{
    grocery::entities::{GroceryList, GroceryListItem, GroceryListStatus},
    ingredients::entities::IngredientCategory,
};
use crate::entity::{grocery_list_items, grocery_lists};

impl From<grocery_lists::Model> for GroceryList {
    fn from(model: grocery_lists::Model) -> Self {
        GroceryList {
            id: model.id,
            user_id: model.user_id,
            status: GroceryListStatus::from(model.status.as_str()),
            name: model.name,
            created_at: Utc.from_utc_datetime(&model.created_at),
            updated_at: Utc.from_utc_datetime(&model.updated_at),
        }
    }
}

impl From<grocery_list_items::Model> for GroceryListItem {
    fn from(model: grocery_list_items::Model) -> Self {
        GroceryListItem {
            id: model.id,
            grocery_list_id: model.grocery_list_id,
            category: IngredientCategory::from(model.category.as_str()),
            name: model.name,
            quantity: model.quantity,
            unit: model.unit,
            is_optional: model.is_optional,
            is_checked: model.is_checked,
            source_recipe_id: model.source_recipe_id,
            created_at: Utc.from_utc_datetime(&model.created_at),
        }
    }
}

impl From<&GroceryListItem> for grocery_list_items::ActiveModel {
    fn from(item: &GroceryListItem) -> Self {
        grocery_list_items::ActiveModel {
            id: Set(item.id),
            grocery_list_id: Set(item.grocery_list_id),
            name: Set(item.name.clone()),
            quantity: Set(item.quantity),
            unit: Set(item.unit.clone()),
            category: Set(item.category.as_str().to_string()),
            is_optional: Set(item.is_optional),
            is_checked: Set(item.is_checked),
            source_recipe_id: Set(item.source_recipe_id),
            created_at: Set(item.created_at.naive_utc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn unknown_stored_values_fall_back() {
        let now = Utc::now().naive_utc();
        let item = GroceryListItem::from(grocery_list_items::Model {
            id: Uuid::new_v4(),
            grocery_list_id: Uuid::new_v4(),
            name: "miso".to_string(),
            quantity: Some(1.5),
            unit: Some("tbsp".to_string()),
            category: "ferments".to_string(),
            is_optional: false,
            is_checked: true,
            source_recipe_id: None,
            created_at: now,
        });
        let list = GroceryList::from(grocery_lists::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Weekend".to_string(),
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        });

        assert_eq!(item.category, IngredientCategory::Other);
        assert!(item.is_checked);
        assert_eq!(list.status, GroceryListStatus::Active);
    }
}
