use chrono::NaiveDate;
use cookwise_core::domain::{
    meal_plan::{entities::MealType, value_objects::SaveRecipeInput},
    suggestion::entities::MealSuggestion,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::http::suggestion::validators::SuggestionRequestValidator;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecipeValidator {
    #[validate(nested)]
    pub request: SuggestionRequestValidator,

    /// The picked suggestion. Without it the request's meal name is used.
    #[serde(default)]
    #[validate(custom(function = "validate_meal"))]
    pub selected: Option<MealSuggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecipeValidator {
    #[validate(nested)]
    pub request: SuggestionRequestValidator,

    /// Dishes the generated recipe must not repeat.
    #[serde(default)]
    #[validate(length(max = 100, message = "at most 100 names can be avoided"))]
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecipeValidator {
    #[validate(custom(function = "validate_meal"))]
    pub meal: MealSuggestion,

    #[validate(length(min = 1, message = "recipe text is required"))]
    pub full_recipe_text: String,

    pub meal_type: MealType,

    /// Defaults to today (UTC).
    #[serde(default)]
    pub plan_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(range(min = 1, max = 20, message = "servings must be between 1 and 20"))]
    pub servings: Option<i32>,

    #[serde(default)]
    pub is_public: bool,
}

fn validate_meal(meal: &MealSuggestion) -> Result<(), ValidationError> {
    if meal.name.trim().is_empty() {
        return Err(ValidationError::new("meal_name").with_message("meal name is required".into()));
    }
    Ok(())
}

impl From<SaveRecipeValidator> for SaveRecipeInput {
    fn from(payload: SaveRecipeValidator) -> Self {
        SaveRecipeInput {
            meal: payload.meal,
            full_recipe_text: payload.full_recipe_text,
            meal_type: payload.meal_type,
            plan_date: payload.plan_date,
            servings: payload.servings,
            is_public: payload.is_public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEAL: &str = r#"{"name":"Veggie Fried Rice","description":"Quick wok dish","estimatedTime":"25 minutes","difficulty":"Easy","emoji":"🍚"}"#;

    #[test]
    fn save_payload_maps_to_input() {
        let json = format!(
            r#"{{"meal":{MEAL},"fullRecipeText":"- **Calories**: 450","mealType":"dinner","planDate":"2026-03-02","servings":2}}"#
        );
        let payload: SaveRecipeValidator = serde_json::from_str(&json).unwrap();
        assert!(payload.validate().is_ok());

        let input = SaveRecipeInput::from(payload);

        assert_eq!(input.meal_type, MealType::Dinner);
        assert_eq!(input.plan_date, NaiveDate::from_ymd_opt(2026, 3, 2));
        assert!(!input.is_public);
    }

    #[test]
    fn blank_meal_name_is_rejected() {
        let json = r#"{"meal":{"name":"  ","description":"","estimatedTime":"","difficulty":"Hard","emoji":""},"fullRecipeText":"x","mealType":"lunch"}"#;
        let payload: SaveRecipeValidator = serde_json::from_str(json).unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn nested_request_rules_apply_to_stream_payloads() {
        let json = r#"{"request":{"flowType":"what-to-cook","cookingTimeMinutes":1}}"#;
        let payload: StreamRecipeValidator = serde_json::from_str(json).unwrap();

        assert!(payload.validate().is_err());
    }
}
