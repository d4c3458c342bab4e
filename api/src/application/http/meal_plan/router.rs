use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::generate_meal_plan::{__path_generate_meal_plan, generate_meal_plan};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(generate_meal_plan))]
pub struct MealPlanApiDoc;

pub fn meal_plan_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/meal-plans/generate", state.args.server.root_path),
        post(generate_meal_plan),
    )
}
