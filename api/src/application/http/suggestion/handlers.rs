pub mod get_suggestions;
