use axum::extract::State;
use cookwise_core::domain::health::ports::HealthCheckService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HealthLiveResponse {
    pub status: String,
    pub database_ping_ms: u64,
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = HealthLiveResponse),
        (status = 500, description = "Database unreachable")
    ),
)]
pub async fn health_live(
    State(state): State<AppState>,
) -> Result<Response<HealthLiveResponse>, ApiError> {
    let database_ping_ms = state.service.health().await.map_err(ApiError::from)?;

    Ok(Response::OK(HealthLiveResponse {
        status: "ok".to_string(),
        database_ping_ms,
    }))
}
