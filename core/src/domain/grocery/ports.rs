use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    grocery::{
        entities::{GroceryList, GroceryListItem, GroceryListStatus},
        value_objects::{CreateGroceryListInput, GroceryListWithItems},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait GroceryListRepository: Send + Sync {
    /// Most recently updated draft or active list of the user.
    fn get_open_list(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<GroceryList>, CoreError>> + Send;

    fn create_list(
        &self,
        list: GroceryList,
    ) -> impl Future<Output = Result<GroceryList, CoreError>> + Send;

    fn add_items(
        &self,
        items: Vec<GroceryListItem>,
    ) -> impl Future<Output = Result<Vec<GroceryListItem>, CoreError>> + Send;

    /// `None` when the list is missing or belongs to someone else.
    fn update_list_status(
        &self,
        list_id: Uuid,
        user_id: Uuid,
        status: GroceryListStatus,
    ) -> impl Future<Output = Result<Option<GroceryList>, CoreError>> + Send;

    /// `None` when the item is missing or its list belongs to someone else.
    fn set_item_checked(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        checked: bool,
    ) -> impl Future<Output = Result<Option<GroceryListItem>, CoreError>> + Send;

    /// Names of checked items on the user's open lists.
    fn get_checked_item_names(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait GroceryListService: Send + Sync {
    /// Appends to the user's open list, creating one when there is none.
    fn create_grocery_list(
        &self,
        identity: Identity,
        input: CreateGroceryListInput,
    ) -> impl Future<Output = Result<GroceryListWithItems, CoreError>> + Send;

    fn set_item_checked(
        &self,
        identity: Identity,
        item_id: Uuid,
        checked: bool,
    ) -> impl Future<Output = Result<GroceryListItem, CoreError>> + Send;

    fn set_list_status(
        &self,
        identity: Identity,
        list_id: Uuid,
        status: GroceryListStatus,
    ) -> impl Future<Output = Result<GroceryList, CoreError>> + Send;

    /// Ingredients the user already has, deduplicated case-insensitively.
    fn owned_ingredients(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}
