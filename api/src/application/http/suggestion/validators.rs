use cookwise_core::domain::{
    meal_plan::entities::MealType,
    suggestion::entities::{ExcludeNames, FlowType, IngredientSource, SuggestionRequest},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Wire form of a suggestion request, shared by every generation route.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequestValidator {
    pub flow_type: FlowType,

    #[serde(default)]
    pub ingredient_source: Option<IngredientSource>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "ingredients must be at most 2000 characters"))]
    pub ingredients: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "at most 20 cuisines can be selected"))]
    pub selected_cuisines: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "at most 20 restrictions can be selected"))]
    pub selected_restrictions: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "at most 20 equipment items can be selected"))]
    pub selected_equipment: Vec<String>,

    #[serde(default)]
    pub spice_level: Option<String>,

    #[serde(default)]
    pub mood_tags: Vec<String>,

    #[serde(default)]
    #[validate(range(min = 5, max = 600, message = "cooking time must be between 5 and 600 minutes"))]
    pub cooking_time_minutes: Option<i32>,

    #[serde(default)]
    pub meal_type: Option<MealType>,

    #[serde(default)]
    #[validate(range(min = 1, max = 20, message = "portions must be between 1 and 20"))]
    pub portions: Option<i32>,

    #[serde(default)]
    #[validate(length(max = 200, message = "meal name must be at most 200 characters"))]
    pub meal_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub extra_notes: Option<String>,

    /// Dishes already shown in this session.
    #[serde(default)]
    pub exclude_names: Vec<String>,
}

impl From<SuggestionRequestValidator> for SuggestionRequest {
    fn from(payload: SuggestionRequestValidator) -> Self {
        SuggestionRequest {
            flow_type: payload.flow_type,
            ingredient_source: payload.ingredient_source,
            ingredients: payload.ingredients,
            selected_cuisines: payload.selected_cuisines,
            selected_restrictions: payload.selected_restrictions,
            selected_equipment: payload.selected_equipment,
            spice_level: payload.spice_level,
            mood_tags: payload.mood_tags,
            cooking_time_minutes: payload.cooking_time_minutes,
            meal_type: payload.meal_type,
            portions: payload.portions,
            meal_name: payload.meal_name,
            extra_notes: payload.extra_notes,
            exclude_names: payload.exclude_names.iter().collect::<ExcludeNames>(),
        }
    }
}
