pub mod authentication;
pub mod common;
pub mod generation;
pub mod grocery;
pub mod health;
pub mod ingredients;
pub mod meal_plan;
pub mod nutrition;
pub mod preference;
pub mod recipe;
pub mod session;
pub mod suggestion;

#[cfg(test)]
pub(crate) mod test_support;
