use axum::extract::State;
use cookwise_core::domain::suggestion::{
    entities::ExcludeNames, ports::SuggestionService, value_objects::StructuredRecipe,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::RequiredIdentity;
use crate::application::http::recipe::validators::StructuredRecipeValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetStructuredRecipeResponse {
    pub data: StructuredRecipe,
}

#[utoipa::path(
    post,
    path = "/structured",
    tag = "recipe",
    summary = "Generate a structured recipe",
    description = "Generates one complete recipe as a typed object with ingredients, instructions and nutrition.",
    responses(
        (status = 200, body = GetStructuredRecipeResponse),
        (status = 502, description = "Generation failed")
    ),
    request_body = StructuredRecipeValidator
)]
pub async fn get_structured_recipe(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<StructuredRecipeValidator>,
) -> Result<Response<GetStructuredRecipeResponse>, ApiError> {
    let avoid: ExcludeNames = payload.avoid.iter().collect();

    let recipe = state
        .service
        .get_structured_recipe(identity, payload.request.into(), avoid)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetStructuredRecipeResponse { data: recipe }))
}
