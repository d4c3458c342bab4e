pub mod create_grocery_list;
pub mod get_owned_ingredients;
pub mod update_item;
pub mod update_list_status;
