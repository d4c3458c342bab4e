use serde_json::json;

use crate::domain::{
    ingredients::schema::get_ingredient_item_schema,
    suggestion::prompts::{MAX_SUGGESTIONS, MIN_SUGGESTIONS},
};

const DIFFICULTIES: [&str; 3] = ["Easy", "Medium", "Hard"];

/// Returns the JSON schema for a batch of meal suggestions
pub fn get_suggestions_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "suggestions": {
                "type": "array",
                "minItems": MIN_SUGGESTIONS,
                "maxItems": MAX_SUGGESTIONS,
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "estimatedTime": { "type": "string" },
                        "difficulty": { "type": "string", "enum": DIFFICULTIES },
                        "emoji": { "type": "string" },
                        "calories": { "type": "integer", "nullable": true },
                        "protein": { "type": "integer", "nullable": true }
                    },
                    "required": ["name", "description", "estimatedTime", "difficulty", "emoji"]
                }
            }
        },
        "required": ["suggestions"]
    })
}

/// Returns the JSON schema for a single structured recipe
pub fn get_structured_recipe_schema() -> serde_json::Value {
    let nullable_int = json!({ "type": "integer", "nullable": true });

    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" },
            "estimatedTime": { "type": "string" },
            "difficulty": { "type": "string", "enum": DIFFICULTIES },
            "servings": { "type": "integer" },
            "ingredients": {
                "type": "array",
                "items": get_ingredient_item_schema()
            },
            "instructions": { "type": "array", "items": { "type": "string" } },
            "tips": { "type": "array", "items": { "type": "string" } },
            "nutrition": {
                "type": "object",
                "properties": {
                    "calories": nullable_int,
                    "protein": nullable_int,
                    "carbs": nullable_int,
                    "fat": nullable_int
                }
            }
        },
        "required": [
            "name", "description", "estimatedTime", "difficulty",
            "servings", "ingredients", "instructions", "nutrition"
        ]
    })
}
