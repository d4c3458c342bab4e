use tracing::{instrument, warn};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, services::Service},
    generation::ports::LLMClient,
    grocery::ports::GroceryListRepository,
    health::ports::HealthCheckRepository,
    meal_plan::ports::MealPlanRepository,
    preference::{
        entities::{
            BudgetLevel, CommunicationTone, CookingSkill, LookupTable, UserPreferenceProfile,
        },
        ports::{PreferenceRepository, PreferenceService},
    },
    recipe::ports::RecipeRepository,
};

impl<P, LLM, RR, MP, GL, HC> PreferenceService for Service<P, LLM, RR, MP, GL, HC>
where
    P: PreferenceRepository,
    LLM: LLMClient,
    RR: RecipeRepository,
    MP: MealPlanRepository,
    GL: GroceryListRepository,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self))]
    async fn resolve_preferences(&self, identity: Identity) -> Option<UserPreferenceProfile> {
        let user_id = identity.user_id().ok()?;

        match load_preference_profile(&self.preference_repository, user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Preference lookup failed, continuing without profile: {}", e);
                None
            }
        }
    }
}

/// Loads the profile row and resolves every lookup it references.
pub async fn load_preference_profile<P>(
    repository: &P,
    user_id: Uuid,
) -> Result<Option<UserPreferenceProfile>, CoreError>
where
    P: PreferenceRepository,
{
    let Some(record) = repository.get_nutrition_profile(user_id).await? else {
        return Ok(None);
    };

    let cuisines = repository
        .get_labels(LookupTable::Cuisines, record.cuisine_ids)
        .await?;
    let dietary_restrictions = repository
        .get_labels(LookupTable::DietaryRestrictions, record.restriction_ids)
        .await?;
    let kitchen_equipment = repository
        .get_labels(LookupTable::KitchenEquipment, record.equipment_ids)
        .await?;
    let flavor_preferences = repository
        .get_labels(LookupTable::FlavorProfiles, record.flavor_ids)
        .await?;
    let food_dislikes = repository.get_food_dislikes(user_id).await?;

    Ok(Some(UserPreferenceProfile {
        cuisines,
        dietary_restrictions,
        kitchen_equipment,
        flavor_preferences,
        food_dislikes,
        cooking_skill: record.cooking_skill.as_deref().and_then(CookingSkill::parse),
        budget_level: record.budget_level.as_deref().and_then(BudgetLevel::parse),
        calorie_target: record.calorie_target,
        protein_target: record.protein_target,
        carb_target: record.carb_target,
        fat_target: record.fat_target,
        communication_tone: record
            .communication_tone
            .as_deref()
            .map(CommunicationTone::from),
        max_cooking_time_minutes: record.max_cooking_time_minutes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        preference::{entities::NutritionProfileRecord, ports::MockPreferenceRepository},
        test_support::service_with,
    };

    fn record(user_id: Uuid) -> NutritionProfileRecord {
        NutritionProfileRecord {
            user_id,
            cuisine_ids: vec![Uuid::new_v4()],
            restriction_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
            cooking_skill: Some("Intermediate".to_string()),
            budget_level: Some("low".to_string()),
            communication_tone: Some("playful".to_string()),
            protein_target: Some(30),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn resolves_labels_for_every_lookup() {
        let user_id = Uuid::new_v4();
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_nutrition_profile()
            .returning(move |_| Box::pin(async move { Ok(Some(record(user_id))) }));
        repo.expect_get_labels().returning(|table, ids| {
            Box::pin(async move {
                let label = match table {
                    LookupTable::Cuisines => "Thai",
                    LookupTable::DietaryRestrictions => "vegetarian",
                    LookupTable::KitchenEquipment => "wok",
                    LookupTable::FlavorProfiles => "umami",
                };
                Ok(ids.iter().map(|_| label.to_string()).collect())
            })
        });
        repo.expect_get_food_dislikes()
            .returning(|_| Box::pin(async { Ok(vec!["cilantro".to_string()]) }));

        let profile = load_preference_profile(&repo, user_id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(profile.cuisines, vec!["Thai"]);
        assert_eq!(profile.dietary_restrictions, vec!["vegetarian", "vegetarian"]);
        assert!(profile.kitchen_equipment.is_empty());
        assert_eq!(profile.food_dislikes, vec!["cilantro"]);
        assert_eq!(profile.cooking_skill, Some(CookingSkill::Intermediate));
        assert_eq!(profile.budget_level, Some(BudgetLevel::Low));
        assert_eq!(profile.tone(), CommunicationTone::Playful);
        assert_eq!(profile.protein_target, Some(30));
    }

    #[tokio::test]
    async fn lookup_error_degrades_to_no_profile() {
        let user_id = Uuid::new_v4();
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_nutrition_profile()
            .returning(move |_| Box::pin(async move { Ok(Some(record(user_id))) }));
        repo.expect_get_labels()
            .returning(|_, _| Box::pin(async { Err(CoreError::InternalServerError) }));

        let service = service_with(repo);

        assert_eq!(service.resolve_preferences(Identity::User(user_id)).await, None);
    }

    #[tokio::test]
    async fn anonymous_caller_gets_no_profile() {
        let repo = MockPreferenceRepository::new();
        let service = service_with(repo);

        assert_eq!(service.resolve_preferences(Identity::Anonymous).await, None);
    }

    #[tokio::test]
    async fn missing_profile_row_is_not_an_error() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_nutrition_profile()
            .returning(|_| Box::pin(async { Ok(None) }));

        let profile = load_preference_profile(&repo, Uuid::new_v4()).await.unwrap();
        assert!(profile.is_none());
    }
}
