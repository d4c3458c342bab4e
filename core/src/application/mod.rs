use crate::{
    domain::common::{CookwiseConfig, services::Service},
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        grocery::PostgresGroceryListRepository,
        health::PostgresHealthCheckRepository,
        llm::GeminiLLMClient,
        meal_plan::PostgresMealPlanRepository,
        preference::PostgresPreferenceRepository,
        recipe::PostgresRecipeRepository,
    },
};

pub type CookwiseService = Service<
    PostgresPreferenceRepository,
    GeminiLLMClient,
    PostgresRecipeRepository,
    PostgresMealPlanRepository,
    PostgresGroceryListRepository,
    PostgresHealthCheckRepository,
>;

pub async fn create_service(config: CookwiseConfig) -> Result<CookwiseService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    let preference_repository = PostgresPreferenceRepository::new(postgres.get_db());
    let recipe_repository = PostgresRecipeRepository::new(postgres.get_db());
    let meal_plan_repository = PostgresMealPlanRepository::new(postgres.get_db());
    let grocery_list_repository = PostgresGroceryListRepository::new(postgres.get_db());
    let health_check_repository = PostgresHealthCheckRepository::new(postgres.get_db());
    let llm_client = GeminiLLMClient::new(&config.llm);

    Ok(Service::new(
        preference_repository,
        llm_client,
        recipe_repository,
        meal_plan_repository,
        grocery_list_repository,
        health_check_repository,
        config.generation,
    ))
}
