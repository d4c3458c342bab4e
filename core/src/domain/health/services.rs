use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    generation::ports::LLMClient,
    grocery::ports::GroceryListRepository,
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    meal_plan::ports::MealPlanRepository,
    preference::ports::PreferenceRepository,
    recipe::ports::RecipeRepository,
};

impl<P, LLM, RR, MP, GL, HC> HealthCheckService for Service<P, LLM, RR, MP, GL, HC>
where
    P: PreferenceRepository,
    LLM: LLMClient,
    RR: RecipeRepository,
    MP: MealPlanRepository,
    GL: GroceryListRepository,
    HC: HealthCheckRepository,
{
    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }

    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readiness().await
    }
}
