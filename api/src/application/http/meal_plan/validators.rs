use chrono::NaiveDate;
use cookwise_core::domain::{
    common::today,
    meal_plan::{entities::MealType, services::MAX_PLAN_DAYS, value_objects::GenerateMealPlanInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::suggestion::validators::SuggestionRequestValidator;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanValidator {
    /// Defaults to today (UTC).
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = MAX_PLAN_DAYS, message = "days must be between 1 and 14"))]
    pub days: u32,

    #[validate(length(min = 1, max = 4, message = "between 1 and 4 meal types are required"))]
    pub meal_types: Vec<MealType>,

    #[validate(nested)]
    pub template: SuggestionRequestValidator,

    #[serde(default)]
    #[validate(range(min = 1, max = 20, message = "servings must be between 1 and 20"))]
    pub servings: Option<i32>,
}

impl From<GenerateMealPlanValidator> for GenerateMealPlanInput {
    fn from(payload: GenerateMealPlanValidator) -> Self {
        GenerateMealPlanInput {
            start_date: payload.start_date.unwrap_or_else(today),
            days: payload.days,
            meal_types: payload.meal_types,
            template: payload.template.into(),
            servings: payload.servings,
        }
    }
}
