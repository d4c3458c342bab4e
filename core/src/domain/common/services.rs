use crate::domain::{
    common::GenerationSettings, generation::ports::LLMClient,
    grocery::ports::GroceryListRepository, health::ports::HealthCheckRepository,
    meal_plan::ports::MealPlanRepository, preference::ports::PreferenceRepository,
    recipe::ports::RecipeRepository,
};

/// Every service trait of the crate is implemented on this one struct.
#[derive(Clone)]
pub struct Service<P, LLM, RR, MP, GL, HC>
where
    P: PreferenceRepository,
    LLM: LLMClient,
    RR: RecipeRepository,
    MP: MealPlanRepository,
    GL: GroceryListRepository,
    HC: HealthCheckRepository,
{
    pub(crate) preference_repository: P,
    pub(crate) llm_client: LLM,
    pub(crate) recipe_repository: RR,
    pub(crate) meal_plan_repository: MP,
    pub(crate) grocery_list_repository: GL,
    pub(crate) health_check_repository: HC,
    pub(crate) settings: GenerationSettings,
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
    pub fn new(
        preference_repository: P,
        llm_client: LLM,
        recipe_repository: RR,
        meal_plan_repository: MP,
        grocery_list_repository: GL,
        health_check_repository: HC,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            preference_repository,
            llm_client,
            recipe_repository,
            meal_plan_repository,
            grocery_list_repository,
            health_check_repository,
            settings,
        }
    }
}
