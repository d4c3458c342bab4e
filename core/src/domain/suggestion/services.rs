use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, services::Service},
    generation::{
        helpers::{decode_generated, with_timeout},
        ports::{LLMClient, ObjectGenerationRequest},
        stream::RecipeStream,
    },
    grocery::ports::GroceryListRepository,
    health::ports::HealthCheckRepository,
    meal_plan::ports::MealPlanRepository,
    preference::ports::{PreferenceRepository, PreferenceService},
    recipe::ports::RecipeRepository,
    suggestion::{
        entities::{ExcludeNames, MealSuggestion, SuggestionRequest},
        ports::SuggestionService,
        prompts::{
            MAX_SUGGESTIONS, MIN_SUGGESTIONS, compose_recipe_prompt,
            compose_structured_recipe_prompt, compose_suggestions_prompt, system_prompt_for,
        },
        schema::{get_structured_recipe_schema, get_suggestions_schema},
        value_objects::{GetFullRecipeInput, StructuredRecipe},
    },
};

#[derive(Debug, Deserialize)]
struct SuggestionBatch {
    suggestions: Vec<MealSuggestion>,
}

impl<P, LLM, RR, MP, GL, HC> SuggestionService for Service<P, LLM, RR, MP, GL, HC>
where
    P: PreferenceRepository,
    LLM: LLMClient,
    RR: RecipeRepository,
    MP: MealPlanRepository,
    GL: GroceryListRepository,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self, request), fields(flow = ?request.flow_type, excluded = request.exclude_names.len()))]
    async fn get_suggestions(
        &self,
        identity: Identity,
        request: SuggestionRequest,
    ) -> Result<Vec<MealSuggestion>, CoreError> {
        identity.user_id()?;

        let profile = self.resolve_preferences(identity).await;
        let prompt = compose_suggestions_prompt(
            &request,
            profile.as_ref(),
            self.settings.exclude_prompt_limit,
        );
        debug!("Suggestion prompt is {} chars", prompt.len());

        let generation = ObjectGenerationRequest {
            prompt,
            system_prompt: Some(system_prompt_for(profile.as_ref())),
            response_schema: get_suggestions_schema(),
            temperature: Some(self.settings.suggestion_temperature),
        };

        let batch = with_timeout(self.settings.timeout, async {
            let raw = self.llm_client.generate_object(generation).await?;
            decode_generated::<SuggestionBatch>(&raw)
        })
        .await?;

        let suggestions = keep_new_suggestions(batch.suggestions, &request.exclude_names);
        if suggestions.len() < MIN_SUGGESTIONS {
            warn!(
                "Model returned {} usable suggestions, expected at least {}",
                suggestions.len(),
                MIN_SUGGESTIONS
            );
            return Err(CoreError::Generation(format!(
                "Expected at least {} new suggestions, got {}",
                MIN_SUGGESTIONS,
                suggestions.len()
            )));
        }

        Ok(suggestions)
    }

    #[instrument(skip(self, input))]
    async fn get_full_recipe(
        &self,
        identity: Identity,
        input: GetFullRecipeInput,
    ) -> Result<RecipeStream, CoreError> {
        identity.user_id()?;

        if input.selected.is_none() && input.request.meal_name().is_none() {
            return Err(CoreError::Validation(
                "a selected suggestion or a meal name is required".to_string(),
            ));
        }

        let profile = self.resolve_preferences(identity).await;
        let prompt = compose_recipe_prompt(&input.request, profile.as_ref(), input.selected.as_ref());
        let system_prompt = system_prompt_for(profile.as_ref());
        debug!("Recipe prompt is {} chars", prompt.len());

        let deadline = Instant::now() + self.settings.timeout;
        let source = with_timeout(
            self.settings.timeout,
            self.llm_client.generate_stream(prompt, system_prompt),
        )
        .await?;

        Ok(RecipeStream::with_deadline(source, deadline))
    }

    #[instrument(skip(self, request, avoid), fields(avoid = avoid.len()))]
    async fn get_structured_recipe(
        &self,
        identity: Identity,
        request: SuggestionRequest,
        avoid: ExcludeNames,
    ) -> Result<StructuredRecipe, CoreError> {
        identity.user_id()?;

        let profile = self.resolve_preferences(identity).await;
        let generation = ObjectGenerationRequest {
            prompt: compose_structured_recipe_prompt(&request, profile.as_ref(), &avoid),
            system_prompt: Some(system_prompt_for(profile.as_ref())),
            response_schema: get_structured_recipe_schema(),
            temperature: Some(self.settings.recipe_temperature),
        };

        let recipe = with_timeout(self.settings.timeout, async {
            let raw = self.llm_client.generate_object(generation).await?;
            decode_generated::<StructuredRecipe>(&raw)
        })
        .await?;

        if recipe.name.trim().is_empty() || recipe.instructions.is_empty() {
            return Err(CoreError::Generation(
                "Model returned an incomplete recipe".to_string(),
            ));
        }

        Ok(recipe)
    }
}

/// Drops blank, already shown and repeated names, then caps the batch.
fn keep_new_suggestions(
    suggestions: Vec<MealSuggestion>,
    exclude: &ExcludeNames,
) -> Vec<MealSuggestion> {
    let mut seen = ExcludeNames::new();

    suggestions
        .into_iter()
        .filter(|s| !exclude.contains(&s.name) && seen.insert(&s.name))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        generation::{
            ports::{MockLLMClient, TextStream},
            stream::StreamOutcome,
        },
        preference::{entities::NutritionProfileRecord, ports::MockPreferenceRepository},
        suggestion::{
            entities::{FlowType, IngredientSource},
            prompts::RESTRICTION_MARKER,
        },
        common::GenerationSettings,
        test_support::{harness, harness_with, harness_with_settings, no_profile},
    };
    use futures::{StreamExt, stream};
    use std::time::Duration;
    use uuid::Uuid;

    fn batch(names: &[&str]) -> String {
        let suggestions: Vec<serde_json::Value> = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "description": format!("A plate of {name}"),
                    "estimatedTime": "30 minutes",
                    "difficulty": "Easy",
                    "emoji": "🥦"
                })
            })
            .collect();
        serde_json::json!({ "suggestions": suggestions }).to_string()
    }

    fn user() -> Identity {
        Identity::User(Uuid::new_v4())
    }

    #[tokio::test]
    async fn vegetarian_scenario_flows_through() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_object()
            .withf(|request| {
                request.prompt.contains(RESTRICTION_MARKER)
                    && request.prompt.contains("vegetarian")
                    && request.prompt.contains("chicken, rice, broccoli")
                    && request.temperature == Some(0.85)
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(batch(&["Broccoli Fried Rice", "Veggie Stir Fry", "Rice Bowl"]))
                })
            });
        let harness = harness(llm);

        let mut request = SuggestionRequest::new(FlowType::WhatToCook);
        request.ingredient_source = Some(IngredientSource::UseMyIngredients);
        request.ingredients = Some("chicken, rice, broccoli".to_string());
        request.selected_restrictions = vec!["vegetarian".to_string()];

        let suggestions = harness.service.get_suggestions(user(), request).await.unwrap();

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].name, "Broccoli Fried Rice");
    }

    #[tokio::test]
    async fn profile_restrictions_reach_the_prompt() {
        let mut preferences = MockPreferenceRepository::new();
        preferences.expect_get_nutrition_profile().returning(|user_id| {
            Box::pin(async move {
                Ok(Some(NutritionProfileRecord {
                    user_id,
                    restriction_ids: vec![Uuid::new_v4()],
                    communication_tone: Some("concise".to_string()),
                    ..Default::default()
                }))
            })
        });
        preferences.expect_get_labels().returning(|_, ids| {
            Box::pin(async move { Ok(ids.iter().map(|_| "gluten-free".to_string()).collect()) })
        });
        preferences
            .expect_get_food_dislikes()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let mut llm = MockLLMClient::new();
        llm.expect_generate_object()
            .withf(|request| {
                request.prompt.contains("gluten-free")
                    && request
                        .system_prompt
                        .as_deref()
                        .is_some_and(|s| s.contains("no-nonsense"))
            })
            .returning(|_| Box::pin(async { Ok(batch(&["A", "B", "C", "D"])) }));
        let harness = harness_with(preferences, llm);

        let suggestions = harness
            .service
            .get_suggestions(user(), SuggestionRequest::new(FlowType::WhatToCook))
            .await
            .unwrap();

        assert_eq!(suggestions.len(), 4);
    }

    #[tokio::test]
    async fn repeated_and_excluded_names_are_dropped() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_object().returning(|request| {
            assert!(request.prompt.contains("Tacos"));
            Box::pin(async { Ok(batch(&["Tacos", "Curry", "Curry", "Pho", "Dal", "Ramen", "Soup"])) })
        });
        let harness = harness(llm);

        let mut request = SuggestionRequest::new(FlowType::WhatToCook);
        request.exclude_names = ["Tacos"].into_iter().collect();

        let names: Vec<String> = harness
            .service
            .get_suggestions(user(), request)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["Curry", "Pho", "Dal", "Ramen", "Soup"]);
    }

    #[tokio::test]
    async fn short_batch_is_a_generation_error() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_object()
            .returning(|_| Box::pin(async { Ok(batch(&["Only one"])) }));
        let harness = harness(llm);

        let result = harness
            .service
            .get_suggestions(user(), SuggestionRequest::new(FlowType::WhatToCook))
            .await;

        assert!(matches!(result, Err(CoreError::Generation(_))));
    }

    #[tokio::test]
    async fn anonymous_caller_never_reaches_the_model() {
        let harness = harness(MockLLMClient::new());

        let result = harness
            .service
            .get_suggestions(Identity::Anonymous, SuggestionRequest::new(FlowType::WhatToCook))
            .await;

        assert_eq!(result, Err(CoreError::Unauthenticated));
    }

    #[tokio::test]
    async fn full_recipe_streams_chunks() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_stream()
            .withf(|prompt, system| prompt.contains("\"Shakshuka\"") && system.contains("## Nutrition Facts"))
            .returning(|_, _| {
                Box::pin(async {
                    let chunks: Vec<Result<String, CoreError>> =
                        vec![Ok("## Ingredients\n".to_string()), Ok("- eggs\n".to_string())];
                    let source: TextStream = Box::pin(stream::iter(chunks));
                    Ok(source)
                })
            });
        let harness = harness(llm);

        let mut request = SuggestionRequest::new(FlowType::IngredientsNeeded);
        request.meal_name = Some("Shakshuka".to_string());

        let recipe = harness
            .service
            .get_full_recipe(user(), GetFullRecipeInput { request, selected: None })
            .await
            .unwrap();

        assert_eq!(
            recipe.collect_text().await.unwrap(),
            StreamOutcome::Completed("## Ingredients\n- eggs\n".to_string())
        );
    }

    #[tokio::test]
    async fn stalled_recipe_stream_ends_at_the_generation_timeout() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_stream().returning(|_, _| {
            Box::pin(async {
                let source: TextStream = Box::pin(stream::pending::<Result<String, CoreError>>());
                Ok(source)
            })
        });
        let settings = GenerationSettings {
            timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let harness = harness_with_settings(no_profile(), llm, settings);

        let mut request = SuggestionRequest::new(FlowType::IngredientsNeeded);
        request.meal_name = Some("Shakshuka".to_string());
        let mut recipe = harness
            .service
            .get_full_recipe(user(), GetFullRecipeInput { request, selected: None })
            .await
            .unwrap();
        let handle = recipe.cancel_handle();

        assert!(matches!(recipe.next().await, Some(Err(CoreError::Generation(_)))));
        assert!(recipe.next().await.is_none());
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn full_recipe_needs_a_meal() {
        let harness = harness(MockLLMClient::new());

        let result = harness
            .service
            .get_full_recipe(
                user(),
                GetFullRecipeInput {
                    request: SuggestionRequest::new(FlowType::IngredientsNeeded),
                    selected: None,
                },
            )
            .await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn structured_recipe_carries_avoid_list() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_object()
            .withf(|request| request.prompt.contains("already planned: Chili"))
            .returning(|_| {
                Box::pin(async {
                    Ok(serde_json::json!({
                        "name": "Minestrone",
                        "description": "Hearty soup.",
                        "estimatedTime": "45 minutes",
                        "difficulty": "Medium",
                        "servings": 4,
                        "ingredients": [],
                        "instructions": ["Simmer everything."],
                        "nutrition": { "calories": 310, "protein": null, "carbs": 50, "fat": 6 }
                    })
                    .to_string())
                })
            });
        let harness = harness(llm);

        let recipe = harness
            .service
            .get_structured_recipe(
                user(),
                SuggestionRequest::new(FlowType::WhatToCook),
                ["Chili"].into_iter().collect(),
            )
            .await
            .unwrap();

        assert_eq!(recipe.name, "Minestrone");
        assert_eq!(recipe.nutrition.carbs, Some(50));
        assert!(recipe.tips.is_empty());
    }
}
