use chrono::NaiveDate;
use std::future::Future;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    meal_plan::{
        entities::{MealPlan, MealPlanItem, MealType},
        value_objects::{BatchPlanReport, BatchProgress, GenerateMealPlanInput, SaveRecipeInput, SaveRecipeOutcome},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait MealPlanRepository: Send + Sync {
    fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        plan_date: NaiveDate,
    ) -> impl Future<Output = Result<Option<MealPlan>, CoreError>> + Send;

    fn create_plan(
        &self,
        plan: MealPlan,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    /// Highest position in `(meal_plan_id, meal_type)`, `None` for an empty group.
    fn get_max_position(
        &self,
        meal_plan_id: Uuid,
        meal_type: MealType,
    ) -> impl Future<Output = Result<Option<i32>, CoreError>> + Send;

    fn create_item(
        &self,
        item: MealPlanItem,
    ) -> impl Future<Output = Result<MealPlanItem, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait MealPlanService: Send + Sync {
    /// Recipe insert failure is the only hard error. Scheduling failures
    /// come back as [`SaveRecipeOutcome::Unscheduled`].
    fn save_recipe(
        &self,
        identity: Identity,
        input: SaveRecipeInput,
    ) -> impl Future<Output = Result<SaveRecipeOutcome, CoreError>> + Send;

    /// Generates and saves one recipe per `(day, meal_type)` slot, one after
    /// the other.
    fn generate_meal_plan(
        &self,
        identity: Identity,
        input: GenerateMealPlanInput,
        progress: Option<UnboundedSender<BatchProgress>>,
    ) -> impl Future<Output = Result<BatchPlanReport, CoreError>> + Send;
}
