use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    meal_plan::entities::MealType,
    suggestion::entities::{MealSuggestion, SuggestionRequest},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRecipeInput {
    pub meal: MealSuggestion,
    pub full_recipe_text: String,
    pub meal_type: MealType,
    /// Defaults to today.
    pub plan_date: Option<NaiveDate>,
    pub servings: Option<i32>,
    pub is_public: bool,
}

/// Result of a save that got past the recipe insert.
///
/// A failed recipe insert is an error, not an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveRecipeOutcome {
    Scheduled {
        recipe_id: Uuid,
        meal_plan_id: Uuid,
        meal_plan_item_id: Uuid,
        position: i32,
    },
    /// Recipe saved but not placed on the plan.
    Unscheduled {
        recipe_id: Uuid,
        reason: UnscheduledReason,
    },
}

impl SaveRecipeOutcome {
    pub fn recipe_id(&self) -> Uuid {
        match self {
            SaveRecipeOutcome::Scheduled { recipe_id, .. }
            | SaveRecipeOutcome::Unscheduled { recipe_id, .. } => *recipe_id,
        }
    }

    pub fn meal_plan_item_id(&self) -> Option<Uuid> {
        match self {
            SaveRecipeOutcome::Scheduled {
                meal_plan_item_id, ..
            } => Some(*meal_plan_item_id),
            SaveRecipeOutcome::Unscheduled { .. } => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, SaveRecipeOutcome::Scheduled { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnscheduledReason {
    MealPlanUnavailable,
    PositionLookupFailed,
    MealPlanItemFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateMealPlanInput {
    pub start_date: NaiveDate,
    pub days: u32,
    pub meal_types: Vec<MealType>,
    /// Preferences applied to every slot. `meal_type` is overridden per slot.
    pub template: SuggestionRequest,
    pub servings: Option<i32>,
}

impl GenerateMealPlanInput {
    pub fn total_slots(&self) -> usize {
        self.days as usize * self.meal_types.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchProgress {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlannedSlot {
    pub plan_date: NaiveDate,
    pub meal_type: MealType,
    pub recipe_name: String,
    pub outcome: SaveRecipeOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FailedSlot {
    pub plan_date: NaiveDate,
    pub meal_type: MealType,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchPlanReport {
    pub planned: Vec<PlannedSlot>,
    pub failed: Vec<FailedSlot>,
}
