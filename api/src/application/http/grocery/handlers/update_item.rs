use axum::extract::{Path, State};
use cookwise_core::domain::grocery::{entities::GroceryListItem, ports::GroceryListService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::auth::RequiredIdentity;
use crate::application::http::grocery::validators::UpdateItemValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateItemResponse {
    pub data: GroceryListItem,
}

#[utoipa::path(
    patch,
    path = "/items/{item_id}",
    tag = "grocery-list",
    summary = "Check or uncheck a grocery item",
    description = "A checked item counts as an ingredient the user already has.",
    params(
        ("item_id" = Uuid, Path, description = "Grocery list item ID"),
    ),
    responses(
        (status = 200, body = UpdateItemResponse),
        (status = 404, description = "No such item for this user")
    ),
    request_body = UpdateItemValidator
)]
pub async fn update_item(
    Path(item_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateItemValidator>,
) -> Result<Response<UpdateItemResponse>, ApiError> {
    let item = state
        .service
        .set_item_checked(identity, item_id, payload.checked)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateItemResponse { data: item }))
}
