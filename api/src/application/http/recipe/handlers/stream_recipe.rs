use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use cookwise_core::domain::suggestion::{ports::SuggestionService, value_objects::GetFullRecipeInput};
use tracing::debug;

use crate::application::auth::RequiredIdentity;
use crate::application::http::recipe::validators::StreamRecipeValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::app_state::AppState;

#[utoipa::path(
    post,
    path = "/stream",
    tag = "recipe",
    summary = "Stream a full recipe",
    description = "Streams the markdown recipe for the picked suggestion, or for the request's meal name when nothing was picked. Closing the connection stops generation.",
    responses(
        (status = 200, content_type = "text/markdown", body = String),
        (status = 400, description = "Neither a suggestion nor a meal name was given"),
        (status = 502, description = "Generation failed")
    ),
    request_body = StreamRecipeValidator
)]
pub async fn stream_recipe(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<StreamRecipeValidator>,
) -> Result<Response, ApiError> {
    let stream = state
        .service
        .get_full_recipe(
            identity,
            GetFullRecipeInput {
                request: payload.request.into(),
                selected: payload.selected,
            },
        )
        .await
        .map_err(ApiError::from)?;
    debug!("recipe stream opened");

    // Dropping the body on disconnect drops the upstream stream with it. The
    // stream ends with an error once the generation timeout passes.
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        Body::from_stream(stream),
    )
        .into_response())
}
