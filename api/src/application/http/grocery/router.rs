use axum::{
    Router,
    routing::{get, patch, post},
};
use utoipa::OpenApi;

use super::handlers::create_grocery_list::{__path_create_grocery_list, create_grocery_list};
use super::handlers::get_owned_ingredients::{__path_get_owned_ingredients, get_owned_ingredients};
use super::handlers::update_item::{__path_update_item, update_item};
use super::handlers::update_list_status::{__path_update_list_status, update_list_status};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(create_grocery_list, update_list_status, update_item, get_owned_ingredients))]
pub struct GroceryListApiDoc;

pub fn grocery_list_routes(state: AppState) -> Router<AppState> {
    let root = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root}/grocery-lists"), post(create_grocery_list))
        .route(&format!("{root}/grocery-lists/owned"), get(get_owned_ingredients))
        .route(
            &format!("{root}/grocery-lists/{{list_id}}/status"),
            patch(update_list_status),
        )
        .route(
            &format!("{root}/grocery-lists/items/{{item_id}}"),
            patch(update_item),
        )
}
