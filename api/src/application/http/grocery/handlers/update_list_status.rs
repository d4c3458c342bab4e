use axum::extract::{Path, State};
use cookwise_core::domain::grocery::{entities::GroceryList, ports::GroceryListService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::auth::RequiredIdentity;
use crate::application::http::grocery::validators::UpdateListStatusValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateListStatusResponse {
    pub data: GroceryList,
}

#[utoipa::path(
    patch,
    path = "/{list_id}/status",
    tag = "grocery-list",
    summary = "Change a grocery list's status",
    params(
        ("list_id" = Uuid, Path, description = "Grocery list ID"),
    ),
    responses(
        (status = 200, body = UpdateListStatusResponse),
        (status = 404, description = "No such list for this user")
    ),
    request_body = UpdateListStatusValidator
)]
pub async fn update_list_status(
    Path(list_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateListStatusValidator>,
) -> Result<Response<UpdateListStatusResponse>, ApiError> {
    let list = state
        .service
        .set_list_status(identity, list_id, payload.status)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateListStatusResponse { data: list }))
}
