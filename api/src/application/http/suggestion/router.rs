use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::get_suggestions::{__path_get_suggestions, get_suggestions};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_suggestions))]
pub struct SuggestionApiDoc;

pub fn suggestion_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/suggestions", state.args.server.root_path),
        post(get_suggestions),
    )
}
