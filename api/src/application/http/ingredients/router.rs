use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::extract_ingredients::{__path_extract_ingredients, extract_ingredients};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(extract_ingredients))]
pub struct IngredientsApiDoc;

pub fn ingredients_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/ingredients/extract", state.args.server.root_path),
        post(extract_ingredients),
    )
}
