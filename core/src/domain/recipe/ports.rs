use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, recipe::entities::Recipe};

#[cfg_attr(test, mockall::automock)]
pub trait RecipeRepository: Send + Sync {
    fn create_recipe(&self, recipe: Recipe)
    -> impl Future<Output = Result<Recipe, CoreError>> + Send;
}
