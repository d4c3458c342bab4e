use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use sea_orm::sea_query::JoinType;
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    grocery::{
        entities::{GroceryList, GroceryListItem, GroceryListStatus},
        ports::GroceryListRepository,
    },
};
use crate::entity::{grocery_list_items, grocery_lists};

const OPEN_STATUSES: [GroceryListStatus; 2] = [GroceryListStatus::Draft, GroceryListStatus::Active];

fn open_status_values() -> Vec<String> {
    OPEN_STATUSES.iter().map(|s| s.as_str().to_string()).collect()
}

fn persistence_error(context: &str, e: sea_orm::DbErr) -> CoreError {
    error!("{}: {}", context, e);
    CoreError::Persistence(e.to_string())
}

#[derive(Debug, Clone)]
pub struct PostgresGroceryListRepository {
    pub db: DatabaseConnection,
}

impl PostgresGroceryListRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl GroceryListRepository for PostgresGroceryListRepository {
    async fn get_open_list(&self, user_id: Uuid) -> Result<Option<GroceryList>, CoreError> {
        let list = grocery_lists::Entity::find()
            .filter(grocery_lists::Column::UserId.eq(user_id))
            .filter(grocery_lists::Column::Status.is_in(open_status_values()))
            .order_by_desc(grocery_lists::Column::UpdatedAt)
            .one(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get open grocery list", e))?
            .map(GroceryList::from);

        Ok(list)
    }

    async fn create_list(&self, list: GroceryList) -> Result<GroceryList, CoreError> {
        grocery_lists::Entity::insert(grocery_lists::ActiveModel {
            id: Set(list.id),
            user_id: Set(list.user_id),
            name: Set(list.name),
            status: Set(list.status.as_str().to_string()),
            created_at: Set(list.created_at.naive_utc()),
            updated_at: Set(list.updated_at.naive_utc()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(GroceryList::from)
        .map_err(|e| persistence_error("Failed to create grocery list", e))
    }

    async fn add_items(
        &self,
        items: Vec<GroceryListItem>,
    ) -> Result<Vec<GroceryListItem>, CoreError> {
        if items.is_empty() {
            return Ok(items);
        }

        grocery_list_items::Entity::insert_many(
            items.iter().map(grocery_list_items::ActiveModel::from),
        )
        .exec(&self.db)
        .await
        .map_err(|e| persistence_error("Failed to add grocery list items", e))?;

        Ok(items)
    }

    async fn update_list_status(
        &self,
        list_id: Uuid,
        user_id: Uuid,
        status: GroceryListStatus,
    ) -> Result<Option<GroceryList>, CoreError> {
        let Some(model) = grocery_lists::Entity::find_by_id(list_id)
            .filter(grocery_lists::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get grocery list", e))?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to update grocery list status", e))?;

        Ok(Some(GroceryList::from(updated)))
    }

    async fn set_item_checked(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        checked: bool,
    ) -> Result<Option<GroceryListItem>, CoreError> {
        let found = grocery_list_items::Entity::find_by_id(item_id)
            .find_also_related(grocery_lists::Entity)
            .one(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get grocery list item", e))?;

        let model = match found {
            Some((item, Some(list))) if list.user_id == user_id => item,
            _ => return Ok(None),
        };

        let mut active = model.into_active_model();
        active.is_checked = Set(checked);

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to update grocery list item", e))?;

        Ok(Some(GroceryListItem::from(updated)))
    }

    async fn get_checked_item_names(&self, user_id: Uuid) -> Result<Vec<String>, CoreError> {
        grocery_list_items::Entity::find()
            .select_only()
            .column(grocery_list_items::Column::Name)
            .join(
                JoinType::InnerJoin,
                grocery_list_items::Relation::GroceryLists.def(),
            )
            .filter(grocery_lists::Column::UserId.eq(user_id))
            .filter(grocery_lists::Column::Status.is_in(open_status_values()))
            .filter(grocery_list_items::Column::IsChecked.eq(true))
            .order_by_asc(grocery_list_items::Column::CreatedAt)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get checked grocery items", e))
    }
}
