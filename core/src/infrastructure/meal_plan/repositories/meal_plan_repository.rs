use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::{
        entities::{MealPlan, MealPlanItem, MealType},
        ports::MealPlanRepository,
    },
};
use crate::entity::{meal_plan_items, meal_plans};

#[derive(Debug, Clone)]
pub struct PostgresMealPlanRepository {
    pub db: DatabaseConnection,
}

impl PostgresMealPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl MealPlanRepository for PostgresMealPlanRepository {
    async fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        plan_date: NaiveDate,
    ) -> Result<Option<MealPlan>, CoreError> {
        let plan = meal_plans::Entity::find()
            .filter(meal_plans::Column::UserId.eq(user_id))
            .filter(meal_plans::Column::PlanDate.eq(plan_date))
            .order_by_asc(meal_plans::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get meal plan by date: {}", e);
                CoreError::Persistence(e.to_string())
            })?
            .map(MealPlan::from);

        Ok(plan)
    }

    async fn create_plan(&self, plan: MealPlan) -> Result<MealPlan, CoreError> {
        meal_plans::Entity::insert(meal_plans::ActiveModel {
            id: Set(plan.id),
            user_id: Set(plan.user_id),
            plan_date: Set(plan.plan_date),
            created_at: Set(plan.created_at.naive_utc()),
            updated_at: Set(plan.updated_at.naive_utc()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(MealPlan::from)
        .map_err(|e| {
            error!("Failed to create meal plan: {}", e);
            CoreError::Persistence(e.to_string())
        })
    }

    async fn get_max_position(
        &self,
        meal_plan_id: Uuid,
        meal_type: MealType,
    ) -> Result<Option<i32>, CoreError> {
        let position = meal_plan_items::Entity::find()
            .select_only()
            .column(meal_plan_items::Column::Position)
            .filter(meal_plan_items::Column::MealPlanId.eq(meal_plan_id))
            .filter(meal_plan_items::Column::MealType.eq(meal_type.as_str()))
            .order_by_desc(meal_plan_items::Column::Position)
            .into_tuple::<i32>()
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to read max meal plan position: {}", e);
                CoreError::Persistence(e.to_string())
            })?;

        Ok(position)
    }

    async fn create_item(&self, item: MealPlanItem) -> Result<MealPlanItem, CoreError> {
        meal_plan_items::Entity::insert(meal_plan_items::ActiveModel {
            id: Set(item.id),
            meal_plan_id: Set(item.meal_plan_id),
            recipe_id: Set(item.recipe_id),
            meal_type: Set(item.meal_type.as_str().to_string()),
            servings: Set(item.servings),
            position: Set(item.position),
            created_at: Set(item.created_at.naive_utc()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(MealPlanItem::from)
        .map_err(|e| {
            error!("Failed to create meal plan item: {}", e);
            CoreError::Persistence(e.to_string())
        })
    }
}
