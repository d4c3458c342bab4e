pub mod mappers;
pub mod repositories;

pub use repositories::meal_plan_repository::PostgresMealPlanRepository;
