pub mod get_structured_recipe;
pub mod save_recipe;
pub mod stream_recipe;
