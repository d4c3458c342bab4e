pub mod grocery;
pub mod health;
pub mod ingredients;
pub mod meal_plan;
pub mod recipe;
pub mod server;
pub mod suggestion;
