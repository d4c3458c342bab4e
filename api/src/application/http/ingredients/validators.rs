use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractIngredientsValidator {
    #[validate(length(min = 1, max = 200, message = "meal name must be between 1 and 200 characters"))]
    pub meal_name: String,

    /// Recipe text or short description to read the ingredients from.
    #[serde(default)]
    #[validate(length(max = 20000, message = "description must be at most 20000 characters"))]
    pub description: String,
}
