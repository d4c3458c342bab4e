use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    generation::stream::RecipeStream,
    suggestion::{
        entities::{ExcludeNames, MealSuggestion, SuggestionRequest},
        value_objects::{GetFullRecipeInput, StructuredRecipe},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait SuggestionService: Send + Sync {
    /// One batch of 3 to 5 suggestions. Names in the request's exclude set
    /// are passed to the model as dishes not to repeat.
    fn get_suggestions(
        &self,
        identity: Identity,
        request: SuggestionRequest,
    ) -> impl Future<Output = Result<Vec<MealSuggestion>, CoreError>> + Send;

    fn get_full_recipe(
        &self,
        identity: Identity,
        input: GetFullRecipeInput,
    ) -> impl Future<Output = Result<RecipeStream, CoreError>> + Send;

    fn get_structured_recipe(
        &self,
        identity: Identity,
        request: SuggestionRequest,
        avoid: ExcludeNames,
    ) -> impl Future<Output = Result<StructuredRecipe, CoreError>> + Send;
}
