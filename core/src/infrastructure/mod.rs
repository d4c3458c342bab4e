pub mod db;
pub mod grocery;
pub mod health;
pub mod llm;
pub mod meal_plan;
pub mod preference;
pub mod recipe;
