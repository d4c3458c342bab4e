use chrono::Days;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, services::Service, today},
    generation::ports::LLMClient,
    grocery::ports::GroceryListRepository,
    health::ports::HealthCheckRepository,
    meal_plan::{
        entities::{MealPlan, MealPlanItem, MealType, next_position},
        ports::{MealPlanRepository, MealPlanService},
        value_objects::{
            BatchPlanReport, BatchProgress, FailedSlot, GenerateMealPlanInput, PlannedSlot,
            SaveRecipeInput, SaveRecipeOutcome, UnscheduledReason,
        },
    },
    nutrition::parse_nutrition,
    preference::ports::PreferenceRepository,
    recipe::{
        entities::{Recipe, RecipeConfig},
        helpers::{compose_full_text, parse_cook_time_minutes},
        ports::RecipeRepository,
    },
    suggestion::{entities::ExcludeNames, ports::SuggestionService},
};

pub const MAX_PLAN_DAYS: u32 = 14;

impl<P, LLM, RR, MP, GL, HC> MealPlanService for Service<P, LLM, RR, MP, GL, HC>
where
    P: PreferenceRepository,
    LLM: LLMClient,
    RR: RecipeRepository,
    MP: MealPlanRepository,
    GL: GroceryListRepository,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self, input), fields(meal = %input.meal.name, meal_type = ?input.meal_type))]
    async fn save_recipe(
        &self,
        identity: Identity,
        input: SaveRecipeInput,
    ) -> Result<SaveRecipeOutcome, CoreError> {
        let user_id = identity.user_id()?;

        if input.meal.name.trim().is_empty() {
            return Err(CoreError::Validation("meal name is required".to_string()));
        }

        let nutrition = parse_nutrition(&input.full_recipe_text);
        debug!("Parsed nutrition {:?}", nutrition);

        let recipe = Recipe::new(RecipeConfig {
            user_id,
            title: input.meal.name.trim().to_string(),
            full_text: compose_full_text(&input.meal.description, &input.full_recipe_text),
            cook_time_minutes: parse_cook_time_minutes(&input.meal.estimated_time),
            difficulty: input.meal.difficulty.into(),
            nutrition,
            is_public: input.is_public,
        });

        let recipe = self.recipe_repository.create_recipe(recipe).await.map_err(|e| {
            error!("Failed to insert recipe: {}", e);
            CoreError::Persistence(format!("Failed to save recipe: {}", e))
        })?;

        let plan_date = input.plan_date.unwrap_or_else(today);
        let unscheduled = |reason: UnscheduledReason| SaveRecipeOutcome::Unscheduled {
            recipe_id: recipe.id,
            reason,
        };

        let plan = match self.get_or_create_plan(user_id, plan_date).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Recipe {} saved without a meal plan: {}", recipe.id, e);
                return Ok(unscheduled(UnscheduledReason::MealPlanUnavailable));
            }
        };

        let position = match self
            .meal_plan_repository
            .get_max_position(plan.id, input.meal_type)
            .await
        {
            Ok(max) => next_position(max),
            Err(e) => {
                warn!("Position lookup failed for plan {}: {}", plan.id, e);
                return Ok(unscheduled(UnscheduledReason::PositionLookupFailed));
            }
        };

        let item = MealPlanItem::new(
            plan.id,
            recipe.id,
            input.meal_type,
            input.servings.filter(|s| *s > 0).unwrap_or(1),
            position,
        );

        match self.meal_plan_repository.create_item(item).await {
            Ok(item) => Ok(SaveRecipeOutcome::Scheduled {
                recipe_id: recipe.id,
                meal_plan_id: plan.id,
                meal_plan_item_id: item.id,
                position: item.position,
            }),
            Err(e) => {
                warn!("Recipe {} saved but not added to plan {}: {}", recipe.id, plan.id, e);
                Ok(unscheduled(UnscheduledReason::MealPlanItemFailed))
            }
        }
    }

    #[instrument(skip(self, input, progress), fields(days = input.days, slots = input.total_slots()))]
    async fn generate_meal_plan(
        &self,
        identity: Identity,
        input: GenerateMealPlanInput,
        progress: Option<UnboundedSender<BatchProgress>>,
    ) -> Result<BatchPlanReport, CoreError> {
        identity.user_id()?;

        if input.days == 0 || input.days > MAX_PLAN_DAYS {
            return Err(CoreError::Validation(format!(
                "days must be between 1 and {}",
                MAX_PLAN_DAYS
            )));
        }
        if input.meal_types.is_empty() {
            return Err(CoreError::Validation(
                "at least one meal type is required".to_string(),
            ));
        }

        let slots = plan_slots(&input)?;
        let total = slots.len();
        let mut avoid: ExcludeNames = input.template.exclude_names.clone();
        let mut report = BatchPlanReport::default();

        for (index, (plan_date, meal_type)) in slots.into_iter().enumerate() {
            let mut request = input.template.clone();
            request.meal_type = Some(meal_type);

            match self
                .generate_and_save(identity, request, &avoid, plan_date, meal_type, input.servings)
                .await
            {
                Ok(slot) => {
                    avoid.insert(&slot.recipe_name);
                    report.planned.push(slot);
                }
                Err(e) => {
                    warn!("Slot {} {} failed: {}", plan_date, meal_type.as_str(), e);
                    report.failed.push(FailedSlot {
                        plan_date,
                        meal_type,
                        error: e.to_string(),
                    });
                }
            }

            if let Some(progress) = &progress {
                // A dropped receiver only means nobody is watching.
                let _ = progress.send(BatchProgress {
                    current: index + 1,
                    total,
                });
            }
        }

        info!(
            "Meal plan batch finished: {} planned, {} failed",
            report.planned.len(),
            report.failed.len()
        );
        Ok(report)
    }
}

impl<P, LLM, RR, MP, GL, HC> Service<P, LLM, RR, MP, GL, HC>
where
    P: PreferenceRepository,
    LLM: LLMClient,
    RR: RecipeRepository,
    MP: MealPlanRepository,
    GL: GroceryListRepository,
    HC: HealthCheckRepository,
{
    async fn get_or_create_plan(
        &self,
        user_id: Uuid,
        plan_date: chrono::NaiveDate,
    ) -> Result<MealPlan, CoreError> {
        if let Some(plan) = self
            .meal_plan_repository
            .get_by_user_and_date(user_id, plan_date)
            .await?
        {
            return Ok(plan);
        }

        self.meal_plan_repository
            .create_plan(MealPlan::new(user_id, plan_date))
            .await
    }

    async fn generate_and_save(
        &self,
        identity: Identity,
        request: crate::domain::suggestion::entities::SuggestionRequest,
        avoid: &ExcludeNames,
        plan_date: chrono::NaiveDate,
        meal_type: MealType,
        servings: Option<i32>,
    ) -> Result<PlannedSlot, CoreError> {
        let recipe = self
            .get_structured_recipe(identity, request, avoid.clone())
            .await?;

        let outcome = self
            .save_recipe(
                identity,
                SaveRecipeInput {
                    meal: recipe.as_suggestion(),
                    full_recipe_text: recipe.to_markdown(),
                    meal_type,
                    plan_date: Some(plan_date),
                    servings: servings.or(Some(recipe.servings)),
                    is_public: false,
                },
            )
            .await?;

        Ok(PlannedSlot {
            plan_date,
            meal_type,
            recipe_name: recipe.name,
            outcome,
        })
    }
}

/// Day-major list of `(date, meal_type)` slots.
fn plan_slots(
    input: &GenerateMealPlanInput,
) -> Result<Vec<(chrono::NaiveDate, MealType)>, CoreError> {
    let mut slots = Vec::with_capacity(input.total_slots());

    for offset in 0..input.days {
        let date = input
            .start_date
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or_else(|| CoreError::Validation("plan date out of range".to_string()))?;
        for meal_type in &input.meal_types {
            slots.push((date, *meal_type));
        }
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        generation::ports::MockLLMClient,
        suggestion::entities::{Difficulty, FlowType, MealSuggestion, SuggestionRequest},
        test_support::harness,
    };
    use chrono::NaiveDate;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    const RECIPE_TEXT: &str = "## Ingredients\n- tofu\n\n## Nutrition Facts\n\
        - **Calories**: 450\n- **Protein**: 25g\n- **Carbohydrates**: 30g\n- **Fat**: 15g\n";

    fn meal(name: &str) -> MealSuggestion {
        MealSuggestion {
            name: name.to_string(),
            description: "Crispy tofu with greens.".to_string(),
            estimated_time: "1 hour 15 minutes".to_string(),
            difficulty: Difficulty::Hard,
            emoji: "🥢".to_string(),
            calories: None,
            protein: None,
        }
    }

    fn input(name: &str, date: NaiveDate) -> SaveRecipeInput {
        SaveRecipeInput {
            meal: meal(name),
            full_recipe_text: RECIPE_TEXT.to_string(),
            meal_type: MealType::Dinner,
            plan_date: Some(date),
            servings: Some(2),
            is_public: false,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn user() -> Identity {
        Identity::User(Uuid::new_v4())
    }

    #[tokio::test]
    async fn full_save_schedules_recipe_with_parsed_fields() {
        let harness = harness(MockLLMClient::new());

        let outcome = harness
            .service
            .save_recipe(user(), input("Crispy Tofu", date()))
            .await
            .unwrap();

        let SaveRecipeOutcome::Scheduled { recipe_id, position, .. } = outcome else {
            panic!("expected a scheduled outcome, got {outcome:?}");
        };
        assert_eq!(position, 1);

        let recipe = harness.store.recipe(recipe_id).unwrap();
        assert_eq!(recipe.title, "Crispy Tofu");
        assert_eq!(recipe.cook_time_minutes, Some(75));
        assert_eq!(recipe.difficulty.as_str(), "advanced");
        assert_eq!(recipe.source.as_str(), "ai_generated");
        assert_eq!(recipe.calories, Some(450));
        assert_eq!(recipe.fat, Some(15));
        assert!(recipe.full_text.starts_with("Crispy tofu with greens."));
    }

    #[tokio::test]
    async fn saving_twice_on_one_date_reuses_the_plan() {
        let harness = harness(MockLLMClient::new());
        let identity = user();

        let first = harness
            .service
            .save_recipe(identity, input("Crispy Tofu", date()))
            .await
            .unwrap();
        let second = harness
            .service
            .save_recipe(identity, input("Miso Soup", date()))
            .await
            .unwrap();

        assert_eq!(harness.store.plan_count(), 1);
        assert_eq!(harness.store.item_count(), 2);
        assert!(matches!(second, SaveRecipeOutcome::Scheduled { position: 2, .. }));
        assert_ne!(first.meal_plan_item_id(), second.meal_plan_item_id());
    }

    #[tokio::test]
    async fn position_follows_the_highest_existing_one() {
        let harness = harness(MockLLMClient::new());
        let identity = user();
        let user_id = identity.user_id().unwrap();
        let plan = harness.store.seed_plan(user_id, date());
        for position in [1, 2, 4] {
            harness.store.seed_item(plan.id, MealType::Dinner, position);
        }
        harness.store.seed_item(plan.id, MealType::Lunch, 9);

        let outcome = harness
            .service
            .save_recipe(identity, input("Crispy Tofu", date()))
            .await
            .unwrap();

        assert!(matches!(outcome, SaveRecipeOutcome::Scheduled { position: 5, .. }));
    }

    #[tokio::test]
    async fn recipe_insert_failure_stops_everything() {
        let harness = harness(MockLLMClient::new());
        harness.store.fail_recipe_insert();

        let result = harness
            .service
            .save_recipe(user(), input("Crispy Tofu", date()))
            .await;

        assert!(matches!(result, Err(CoreError::Persistence(_))));
        assert_eq!(harness.store.plan_count(), 0);
        assert_eq!(harness.store.item_count(), 0);
    }

    #[tokio::test]
    async fn plan_insert_failure_leaves_recipe_unscheduled() {
        let harness = harness(MockLLMClient::new());
        harness.store.fail_plan_insert();

        let outcome = harness
            .service
            .save_recipe(user(), input("Crispy Tofu", date()))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SaveRecipeOutcome::Unscheduled {
                recipe_id: outcome.recipe_id(),
                reason: UnscheduledReason::MealPlanUnavailable,
            }
        );
        assert!(harness.store.recipe(outcome.recipe_id()).is_some());
        assert_eq!(harness.store.item_count(), 0);
    }

    #[tokio::test]
    async fn item_insert_failure_leaves_recipe_unscheduled() {
        let harness = harness(MockLLMClient::new());
        harness.store.fail_item_insert();

        let outcome = harness
            .service
            .save_recipe(user(), input("Crispy Tofu", date()))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            SaveRecipeOutcome::Unscheduled {
                reason: UnscheduledReason::MealPlanItemFailed,
                ..
            }
        ));
        assert_eq!(harness.store.plan_count(), 1);
        assert_eq!(harness.store.item_count(), 0);
    }

    #[tokio::test]
    async fn position_lookup_failure_leaves_recipe_unscheduled() {
        let harness = harness(MockLLMClient::new());
        harness.store.fail_position_lookup();

        let outcome = harness
            .service
            .save_recipe(user(), input("Crispy Tofu", date()))
            .await
            .unwrap();

        assert!(!outcome.is_scheduled());
        assert_eq!(harness.store.item_count(), 0);
    }

    fn structured(name: &str) -> String {
        serde_json::json!({
            "name": name,
            "description": "Planned meal.",
            "estimatedTime": "25 minutes",
            "difficulty": "Easy",
            "servings": 2,
            "ingredients": [],
            "instructions": ["Cook it."],
            "nutrition": { "calories": 500, "protein": 20, "carbs": null, "fat": null }
        })
        .to_string()
    }

    #[tokio::test]
    async fn batch_plan_runs_every_slot_and_reports_progress() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut llm = MockLLMClient::new();
        llm.expect_generate_object().returning(move |request| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n > 0 {
                assert!(request.prompt.contains("Dish 0"));
            }
            Box::pin(async move {
                if n == 2 {
                    Err(CoreError::Generation("model overloaded".to_string()))
                } else {
                    Ok(structured(&format!("Dish {n}")))
                }
            })
        });
        let harness = harness(llm);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let report = harness
            .service
            .generate_meal_plan(
                user(),
                GenerateMealPlanInput {
                    start_date: date(),
                    days: 2,
                    meal_types: vec![MealType::Lunch, MealType::Dinner],
                    template: SuggestionRequest::new(FlowType::WhatToCook),
                    servings: None,
                },
                Some(tx),
            )
            .await
            .unwrap();

        assert_eq!(report.planned.len(), 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].plan_date, date().succ_opt().unwrap());
        assert_eq!(report.failed[0].meal_type, MealType::Lunch);
        assert_eq!(harness.store.plan_count(), 2);
        assert!(report.planned.iter().all(|slot| slot.outcome.is_scheduled()));

        let mut seen = Vec::new();
        while let Ok(progress) = rx.try_recv() {
            seen.push(progress.current);
            assert_eq!(progress.total, 4);
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn batch_plan_rejects_empty_meal_types() {
        let harness = harness(MockLLMClient::new());

        let result = harness
            .service
            .generate_meal_plan(
                user(),
                GenerateMealPlanInput {
                    start_date: date(),
                    days: 1,
                    meal_types: vec![],
                    template: SuggestionRequest::new(FlowType::WhatToCook),
                    servings: None,
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
