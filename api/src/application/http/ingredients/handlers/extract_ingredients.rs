use axum::extract::State;
use cookwise_core::domain::ingredients::{entities::ExtractedIngredient, ports::IngredientService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::RequiredIdentity;
use crate::application::http::ingredients::validators::ExtractIngredientsValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ExtractIngredientsResponse {
    pub data: Vec<ExtractedIngredient>,
}

#[utoipa::path(
    post,
    path = "/extract",
    tag = "ingredients",
    summary = "Extract ingredients",
    description = "Reads a structured ingredient list out of a recipe. Returns an empty list when extraction fails.",
    responses(
        (status = 200, body = ExtractIngredientsResponse)
    ),
    request_body = ExtractIngredientsValidator
)]
pub async fn extract_ingredients(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<ExtractIngredientsValidator>,
) -> Result<Response<ExtractIngredientsResponse>, ApiError> {
    let ingredients = state
        .service
        .extract_ingredients(identity, payload.meal_name, payload.description)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ExtractIngredientsResponse { data: ingredients }))
}
