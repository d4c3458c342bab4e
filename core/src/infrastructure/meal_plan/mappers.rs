use chrono::{TimeZone, Utc};

use crate::domain::meal_plan::entities::{MealPlan, MealPlanItem, MealType};
use crate::entity::{meal_plan_items::Model as MealPlanItemModel, meal_plans::Model as MealPlanModel};

impl From<MealPlanModel> for MealPlan {
    fn from(model: MealPlanModel) -> Self {
        MealPlan {
            id: model.id,
            user_id: model.user_id,
            plan_date: model.plan_date,
            created_at: Utc.from_utc_datetime(&model.created_at),
            updated_at: Utc.from_utc_datetime(&model.updated_at),
        }
    }
}

impl From<MealPlanItemModel> for MealPlanItem {
    fn from(model: MealPlanItemModel) -> Self {
        MealPlanItem {
            id: model.id,
            meal_plan_id: model.meal_plan_id,
            recipe_id: model.recipe_id,
            meal_type: MealType::from(model.meal_type.as_str()),
            servings: model.servings,
            position: model.position,
            created_at: Utc.from_utc_datetime(&model.created_at),
        }
    }
}
