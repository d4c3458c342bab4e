use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, services::Service},
    generation::{
        helpers::{decode_generated, with_timeout},
        ports::{LLMClient, ObjectGenerationRequest},
    },
    grocery::ports::GroceryListRepository,
    health::ports::HealthCheckRepository,
    ingredients::{
        entities::ExtractedIngredient,
        ports::IngredientService,
        prompts::{INGREDIENT_EXTRACTION_SYSTEM_PROMPT, compose_ingredient_extraction_prompt},
        schema::get_ingredient_list_schema,
    },
    meal_plan::ports::MealPlanRepository,
    preference::ports::PreferenceRepository,
    recipe::ports::RecipeRepository,
};

#[derive(Debug, Deserialize)]
struct IngredientList {
    ingredients: Vec<ExtractedIngredient>,
}

impl<P, LLM, RR, MP, GL, HC> IngredientService for Service<P, LLM, RR, MP, GL, HC>
where
    P: PreferenceRepository,
    LLM: LLMClient,
    RR: RecipeRepository,
    MP: MealPlanRepository,
    GL: GroceryListRepository,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self, description), fields(meal_name = %meal_name))]
    async fn extract_ingredients(
        &self,
        identity: Identity,
        meal_name: String,
        description: String,
    ) -> Result<Vec<ExtractedIngredient>, CoreError> {
        identity.user_id()?;

        if meal_name.trim().is_empty() {
            return Err(CoreError::Validation("meal name is required".to_string()));
        }

        let request = ObjectGenerationRequest {
            prompt: compose_ingredient_extraction_prompt(&meal_name, &description),
            system_prompt: Some(INGREDIENT_EXTRACTION_SYSTEM_PROMPT.to_string()),
            response_schema: get_ingredient_list_schema(),
            temperature: Some(self.settings.extraction_temperature),
        };

        let result = with_timeout(self.settings.timeout, async {
            let raw = self.llm_client.generate_object(request).await?;
            decode_generated::<IngredientList>(&raw)
        })
        .await;

        match result {
            Ok(list) => {
                let ingredients: Vec<ExtractedIngredient> = list
                    .ingredients
                    .into_iter()
                    .filter(|i| !i.name.trim().is_empty())
                    .collect();
                debug!("Extracted {} ingredients", ingredients.len());
                Ok(ingredients)
            }
            Err(e) => {
                warn!("Ingredient extraction failed, returning empty list: {}", e);
                Ok(Vec::new())
            }
        }
    }
}
