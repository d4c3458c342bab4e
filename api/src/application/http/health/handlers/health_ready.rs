use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cookwise_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};

use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::app_state::AppState;

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Reports database reachability. Answers 503 while the database is down.",
    responses(
        (status = 200, body = DatabaseHealthStatus),
        (status = 503, body = DatabaseHealthStatus)
    ),
)]
pub async fn health_ready(State(state): State<AppState>) -> Result<Response, ApiError> {
    let status = state.service.readiness().await.map_err(ApiError::from)?;

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((code, Json(status)).into_response())
}
