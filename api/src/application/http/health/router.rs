use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::health_live::{__path_health_live, health_live};
use super::handlers::health_ready::{__path_health_ready, health_ready};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(health_live, health_ready))]
pub struct HealthApiDoc;

pub fn health_routes(state: AppState) -> Router<AppState> {
    let root = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root}/health/live"), get(health_live))
        .route(&format!("{root}/health/ready"), get(health_ready))
}
