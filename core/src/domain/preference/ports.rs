use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    preference::entities::{LookupTable, NutritionProfileRecord, UserPreferenceProfile},
};

#[cfg_attr(test, mockall::automock)]
pub trait PreferenceRepository: Send + Sync {
    fn get_nutrition_profile(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<NutritionProfileRecord>, CoreError>> + Send;

    /// Resolves ids to labels, preserving the order of `ids`.
    fn get_labels(
        &self,
        table: LookupTable,
        ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;

    fn get_food_dislikes(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait PreferenceService: Send + Sync {
    /// Never fails: a missing or unreadable profile resolves to `None`.
    fn resolve_preferences(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Option<UserPreferenceProfile>> + Send;
}
