use axum::extract::State;
use cookwise_core::domain::grocery::ports::GroceryListService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetOwnedIngredientsResponse {
    pub data: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/owned",
    tag = "grocery-list",
    summary = "List owned ingredients",
    description = "Names of checked items across the caller's open grocery lists.",
    responses(
        (status = 200, body = GetOwnedIngredientsResponse)
    ),
)]
pub async fn get_owned_ingredients(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<GetOwnedIngredientsResponse>, ApiError> {
    let names = state
        .service
        .owned_ingredients(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetOwnedIngredientsResponse { data: names }))
}
