use axum::extract::State;
use cookwise_core::domain::suggestion::{entities::MealSuggestion, ports::SuggestionService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::suggestion::validators::SuggestionRequestValidator;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetSuggestionsResponse {
    pub data: Vec<MealSuggestion>,
}

#[utoipa::path(
    post,
    path = "",
    tag = "suggestion",
    summary = "Get meal suggestions",
    description = "Generates 3 to 5 meal ideas tailored to the request and the caller's saved preferences. Names listed in excludeNames are not suggested again.",
    responses(
        (status = 200, body = GetSuggestionsResponse),
        (status = 502, description = "Generation failed")
    ),
    request_body = SuggestionRequestValidator
)]
pub async fn get_suggestions(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<SuggestionRequestValidator>,
) -> Result<Response<GetSuggestionsResponse>, ApiError> {
    let suggestions = state
        .service
        .get_suggestions(identity, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetSuggestionsResponse { data: suggestions }))
}
