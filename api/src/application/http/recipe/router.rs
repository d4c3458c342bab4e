use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::get_structured_recipe::{__path_get_structured_recipe, get_structured_recipe};
use super::handlers::save_recipe::{__path_save_recipe, save_recipe};
use super::handlers::stream_recipe::{__path_stream_recipe, stream_recipe};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(stream_recipe, get_structured_recipe, save_recipe))]
pub struct RecipeApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    let root = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root}/recipes"), post(save_recipe))
        .route(&format!("{root}/recipes/stream"), post(stream_recipe))
        .route(&format!("{root}/recipes/structured"), post(get_structured_recipe))
}
