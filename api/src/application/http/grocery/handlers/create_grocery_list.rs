use axum::extract::State;
use cookwise_core::domain::grocery::{ports::GroceryListService, value_objects::GroceryListWithItems};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::RequiredIdentity;
use crate::application::http::grocery::validators::CreateGroceryListValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateGroceryListResponse {
    pub data: GroceryListWithItems,
}

#[utoipa::path(
    post,
    path = "",
    tag = "grocery-list",
    summary = "Add ingredients to a grocery list",
    description = "Appends the ingredients to the caller's open grocery list, creating a draft list when none is open.",
    responses(
        (status = 201, body = CreateGroceryListResponse)
    ),
    request_body = CreateGroceryListValidator
)]
pub async fn create_grocery_list(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateGroceryListValidator>,
) -> Result<Response<CreateGroceryListResponse>, ApiError> {
    let list = state
        .service
        .create_grocery_list(identity, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateGroceryListResponse { data: list }))
}
