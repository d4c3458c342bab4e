pub mod grocery_list_repository;
