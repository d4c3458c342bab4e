use axum::extract::State;
use cookwise_core::domain::meal_plan::{ports::MealPlanService, value_objects::BatchPlanReport};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::application::auth::RequiredIdentity;
use crate::application::http::meal_plan::validators::GenerateMealPlanValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GenerateMealPlanResponse {
    pub data: BatchPlanReport,
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "meal-plan",
    summary = "Generate a meal plan",
    description = "Generates and schedules one recipe per day and meal type. Slots that fail are listed in `failed`; the rest of the plan is still saved.",
    responses(
        (status = 200, body = GenerateMealPlanResponse),
        (status = 400, description = "Invalid plan length or no meal types")
    ),
    request_body = GenerateMealPlanValidator
)]
pub async fn generate_meal_plan(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<GenerateMealPlanValidator>,
) -> Result<Response<GenerateMealPlanResponse>, ApiError> {
    let report = state
        .service
        .generate_meal_plan(identity, payload.into(), None)
        .await
        .map_err(ApiError::from)?;
    info!(
        planned = report.planned.len(),
        failed = report.failed.len(),
        "meal plan request finished"
    );

    Ok(Response::OK(GenerateMealPlanResponse { data: report }))
}
