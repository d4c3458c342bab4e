//! Shared fixtures for service tests: mocked generation and preference
//! ports, plus one in-memory store standing in for every relational port.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    common::{GenerationSettings, entities::app_errors::CoreError, services::Service},
    generation::ports::MockLLMClient,
    grocery::{
        entities::{GroceryList, GroceryListItem, GroceryListStatus},
        ports::GroceryListRepository,
    },
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
    meal_plan::{
        entities::{MealPlan, MealPlanItem, MealType},
        ports::MealPlanRepository,
    },
    preference::ports::MockPreferenceRepository,
    recipe::{entities::Recipe, ports::RecipeRepository},
};

pub type TestService = Service<
    MockPreferenceRepository,
    MockLLMClient,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
>;

pub struct TestHarness {
    pub service: TestService,
    pub store: InMemoryStore,
}

pub fn no_profile() -> MockPreferenceRepository {
    let mut repo = MockPreferenceRepository::new();
    repo.expect_get_nutrition_profile()
        .returning(|_| Box::pin(async { Ok(None) }));
    repo
}

pub fn service_with(preferences: MockPreferenceRepository) -> TestService {
    harness_with(preferences, MockLLMClient::new()).service
}

pub fn harness(llm: MockLLMClient) -> TestHarness {
    harness_with(no_profile(), llm)
}

pub fn harness_with(preferences: MockPreferenceRepository, llm: MockLLMClient) -> TestHarness {
    harness_with_settings(preferences, llm, GenerationSettings::default())
}

pub fn harness_with_settings(
    preferences: MockPreferenceRepository,
    llm: MockLLMClient,
    settings: GenerationSettings,
) -> TestHarness {
    let store = InMemoryStore::default();
    let service = Service::new(
        preferences,
        llm,
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        settings,
    );

    TestHarness { service, store }
}

#[derive(Default)]
struct StoreState {
    recipes: Vec<Recipe>,
    plans: Vec<MealPlan>,
    items: Vec<MealPlanItem>,
    grocery_lists: Vec<GroceryList>,
    grocery_items: Vec<GroceryListItem>,
    fail_recipe_insert: bool,
    fail_plan_insert: bool,
    fail_item_insert: bool,
    fail_position_lookup: bool,
    fail_health: bool,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    pub fn fail_recipe_insert(&self) {
        self.lock().fail_recipe_insert = true;
    }

    pub fn fail_plan_insert(&self) {
        self.lock().fail_plan_insert = true;
    }

    pub fn fail_item_insert(&self) {
        self.lock().fail_item_insert = true;
    }

    pub fn fail_position_lookup(&self) {
        self.lock().fail_position_lookup = true;
    }

    pub fn fail_health(&self) {
        self.lock().fail_health = true;
    }

    pub fn recipe(&self, id: Uuid) -> Option<Recipe> {
        self.lock().recipes.iter().find(|r| r.id == id).cloned()
    }

    pub fn recipe_count(&self) -> usize {
        self.lock().recipes.len()
    }

    pub fn plan_count(&self) -> usize {
        self.lock().plans.len()
    }

    pub fn item_count(&self) -> usize {
        self.lock().items.len()
    }

    pub fn grocery_item_count(&self) -> usize {
        self.lock().grocery_items.len()
    }

    pub fn seed_plan(&self, user_id: Uuid, plan_date: NaiveDate) -> MealPlan {
        let plan = MealPlan::new(user_id, plan_date);
        self.lock().plans.push(plan.clone());
        plan
    }

    pub fn seed_item(&self, meal_plan_id: Uuid, meal_type: MealType, position: i32) {
        let item = MealPlanItem::new(meal_plan_id, Uuid::new_v4(), meal_type, 1, position);
        self.lock().items.push(item);
    }
}

fn injected() -> CoreError {
    CoreError::Persistence("injected failure".to_string())
}

impl RecipeRepository for InMemoryStore {
    async fn create_recipe(&self, recipe: Recipe) -> Result<Recipe, CoreError> {
        let mut state = self.lock();
        if state.fail_recipe_insert {
            return Err(injected());
        }
        state.recipes.push(recipe.clone());
        Ok(recipe)
    }
}

impl MealPlanRepository for InMemoryStore {
    async fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        plan_date: NaiveDate,
    ) -> Result<Option<MealPlan>, CoreError> {
        Ok(self
            .lock()
            .plans
            .iter()
            .find(|p| p.user_id == user_id && p.plan_date == plan_date)
            .cloned())
    }

    async fn create_plan(&self, plan: MealPlan) -> Result<MealPlan, CoreError> {
        let mut state = self.lock();
        if state.fail_plan_insert {
            return Err(injected());
        }
        state.plans.push(plan.clone());
        Ok(plan)
    }

    async fn get_max_position(
        &self,
        meal_plan_id: Uuid,
        meal_type: MealType,
    ) -> Result<Option<i32>, CoreError> {
        let state = self.lock();
        if state.fail_position_lookup {
            return Err(injected());
        }
        Ok(state
            .items
            .iter()
            .filter(|i| i.meal_plan_id == meal_plan_id && i.meal_type == meal_type)
            .map(|i| i.position)
            .max())
    }

    async fn create_item(&self, item: MealPlanItem) -> Result<MealPlanItem, CoreError> {
        let mut state = self.lock();
        if state.fail_item_insert {
            return Err(injected());
        }
        state.items.push(item.clone());
        Ok(item)
    }
}

impl GroceryListRepository for InMemoryStore {
    async fn get_open_list(&self, user_id: Uuid) -> Result<Option<GroceryList>, CoreError> {
        Ok(self
            .lock()
            .grocery_lists
            .iter()
            .filter(|l| l.user_id == user_id && l.status.is_open())
            .max_by_key(|l| l.updated_at)
            .cloned())
    }

    async fn create_list(&self, list: GroceryList) -> Result<GroceryList, CoreError> {
        self.lock().grocery_lists.push(list.clone());
        Ok(list)
    }

    async fn add_items(
        &self,
        items: Vec<GroceryListItem>,
    ) -> Result<Vec<GroceryListItem>, CoreError> {
        self.lock().grocery_items.extend(items.iter().cloned());
        Ok(items)
    }

    async fn update_list_status(
        &self,
        list_id: Uuid,
        user_id: Uuid,
        status: GroceryListStatus,
    ) -> Result<Option<GroceryList>, CoreError> {
        let mut state = self.lock();
        let Some(list) = state
            .grocery_lists
            .iter_mut()
            .find(|l| l.id == list_id && l.user_id == user_id)
        else {
            return Ok(None);
        };
        list.status = status;
        list.updated_at = Utc::now();
        Ok(Some(list.clone()))
    }

    async fn set_item_checked(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        checked: bool,
    ) -> Result<Option<GroceryListItem>, CoreError> {
        let mut state = self.lock();
        let owned_lists: Vec<Uuid> = state
            .grocery_lists
            .iter()
            .filter(|l| l.user_id == user_id)
            .map(|l| l.id)
            .collect();
        let Some(item) = state
            .grocery_items
            .iter_mut()
            .find(|i| i.id == item_id && owned_lists.contains(&i.grocery_list_id))
        else {
            return Ok(None);
        };
        item.is_checked = checked;
        Ok(Some(item.clone()))
    }

    async fn get_checked_item_names(&self, user_id: Uuid) -> Result<Vec<String>, CoreError> {
        let state = self.lock();
        let open_lists: Vec<Uuid> = state
            .grocery_lists
            .iter()
            .filter(|l| l.user_id == user_id && l.status.is_open())
            .map(|l| l.id)
            .collect();
        Ok(state
            .grocery_items
            .iter()
            .filter(|i| i.is_checked && open_lists.contains(&i.grocery_list_id))
            .map(|i| i.name.clone())
            .collect())
    }
}

impl HealthCheckRepository for InMemoryStore {
    async fn health(&self) -> Result<u64, CoreError> {
        if self.lock().fail_health {
            return Err(CoreError::InternalServerError);
        }
        Ok(0)
    }

    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        if self.lock().fail_health {
            return Ok(DatabaseHealthStatus::unhealthy(0, "injected failure".to_string()));
        }
        Ok(DatabaseHealthStatus::healthy(0))
    }
}
