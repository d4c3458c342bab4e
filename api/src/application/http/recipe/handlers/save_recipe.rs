use axum::extract::State;
use cookwise_core::domain::meal_plan::{ports::MealPlanService, value_objects::SaveRecipeOutcome};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::RequiredIdentity;
use crate::application::http::recipe::validators::SaveRecipeValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SaveRecipeResponse {
    pub data: SaveRecipeOutcome,
}

#[utoipa::path(
    post,
    path = "",
    tag = "recipe",
    summary = "Save a recipe",
    description = "Stores the recipe, then places it on the caller's meal plan for the given date. A recipe that was stored but could not be scheduled is reported with status `unscheduled`.",
    responses(
        (status = 201, body = SaveRecipeResponse),
        (status = 500, description = "The recipe itself could not be stored")
    ),
    request_body = SaveRecipeValidator
)]
pub async fn save_recipe(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<SaveRecipeValidator>,
) -> Result<Response<SaveRecipeResponse>, ApiError> {
    let outcome = state
        .service
        .save_recipe(identity, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(SaveRecipeResponse { data: outcome }))
}
