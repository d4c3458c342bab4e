use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl From<&str> for MealType {
    fn from(s: &str) -> Self {
        match s {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "snack" => MealType::Snack,
            _ => MealType::Dinner,
        }
    }
}

/// One plan per user per calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MealPlan {
    pub fn new(user_id: Uuid, plan_date: NaiveDate) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            plan_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MealPlanItem {
    pub id: Uuid,
    pub meal_plan_id: Uuid,
    pub recipe_id: Uuid,
    pub meal_type: MealType,
    pub servings: i32,
    /// 1-based ordinal within `(meal_plan_id, meal_type)`.
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl MealPlanItem {
    pub fn new(
        meal_plan_id: Uuid,
        recipe_id: Uuid,
        meal_type: MealType,
        servings: i32,
        position: i32,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            meal_plan_id,
            recipe_id,
            meal_type,
            servings,
            position,
            created_at: now,
        }
    }
}

/// Next slot after the highest existing position. Gaps are kept as-is.
pub fn next_position(max_existing: Option<i32>) -> i32 {
    max_existing.map_or(1, |max| max.saturating_add(1))
}
