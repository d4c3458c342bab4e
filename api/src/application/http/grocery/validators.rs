use cookwise_core::domain::{
    grocery::{entities::GroceryListStatus, value_objects::CreateGroceryListInput},
    ingredients::entities::ExtractedIngredient,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroceryListValidator {
    /// Used only when no open list exists yet.
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 200, message = "between 1 and 200 ingredients are required"),
        custom(function = "validate_ingredient_names")
    )]
    pub ingredients: Vec<ExtractedIngredient>,

    #[serde(default)]
    pub source_recipe_id: Option<Uuid>,
}

fn validate_ingredient_names(ingredients: &[ExtractedIngredient]) -> Result<(), ValidationError> {
    if ingredients.iter().any(|i| i.name.trim().is_empty()) {
        return Err(ValidationError::new("ingredient_name")
            .with_message("every ingredient needs a name".into()));
    }
    Ok(())
}

impl From<CreateGroceryListValidator> for CreateGroceryListInput {
    fn from(payload: CreateGroceryListValidator) -> Self {
        CreateGroceryListInput {
            name: payload.name,
            ingredients: payload.ingredients,
            source_recipe_id: payload.source_recipe_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateListStatusValidator {
    pub status: GroceryListStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItemValidator {
    pub checked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ingredient_list_is_rejected() {
        let payload: CreateGroceryListValidator =
            serde_json::from_str(r#"{"ingredients":[]}"#).unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn nameless_ingredient_is_rejected() {
        let payload: CreateGroceryListValidator =
            serde_json::from_str(r#"{"ingredients":[{"name":" ","category":"spices"}]}"#).unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn extracted_ingredients_are_accepted_as_is() {
        let payload: CreateGroceryListValidator = serde_json::from_str(
            r#"{"name":"Weekend","ingredients":[{"name":"rice","quantity":2,"unit":"cups","category":"grains"}]}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());

        let input = CreateGroceryListInput::from(payload);

        assert_eq!(input.ingredients[0].quantity, Some(2.0));
        assert_eq!(input.name.as_deref(), Some("Weekend"));
    }
}
