use serde_json::json;

use crate::domain::ingredients::entities::IngredientCategory;

/// JSON schema for a single ingredient, shared with the structured recipe schema.
pub fn get_ingredient_item_schema() -> serde_json::Value {
    let categories: Vec<&str> = IngredientCategory::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "quantity": { "type": "number", "nullable": true },
            "unit": { "type": "string", "nullable": true },
            "category": { "type": "string", "enum": categories },
            "optional": { "type": "boolean" }
        },
        "required": ["name", "quantity", "unit", "category", "optional"]
    })
}

/// Returns the JSON schema for ingredient extraction responses
pub fn get_ingredient_list_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": get_ingredient_item_schema()
            }
        },
        "required": ["ingredients"]
    })
}
