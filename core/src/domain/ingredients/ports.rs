use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
    ingredients::entities::ExtractedIngredient,
};

#[cfg_attr(test, mockall::automock)]
pub trait IngredientService: Send + Sync {
    /// Best-effort: generation failures yield an empty list. Only a missing
    /// user or an empty meal name is an error.
    fn extract_ingredients(
        &self,
        identity: Identity,
        meal_name: String,
        description: String,
    ) -> impl Future<Output = Result<Vec<ExtractedIngredient>, CoreError>> + Send;
}
