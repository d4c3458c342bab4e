pub mod mappers;
pub mod repositories;

pub use repositories::grocery_list_repository::PostgresGroceryListRepository;
