use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, services::Service},
    generation::ports::LLMClient,
    grocery::{
        entities::{GroceryList, GroceryListItem, GroceryListStatus},
        ports::{GroceryListRepository, GroceryListService},
        value_objects::{CreateGroceryListInput, DEFAULT_GROCERY_LIST_NAME, GroceryListWithItems},
    },
    health::ports::HealthCheckRepository,
    ingredients::entities::ExtractedIngredient,
    meal_plan::ports::MealPlanRepository,
    preference::ports::PreferenceRepository,
    recipe::ports::RecipeRepository,
};

impl<P, LLM, RR, MP, GL, HC> GroceryListService for Service<P, LLM, RR, MP, GL, HC>
where
    P: PreferenceRepository,
    LLM: LLMClient,
    RR: RecipeRepository,
    MP: MealPlanRepository,
    GL: GroceryListRepository,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self, input), fields(ingredients = input.ingredients.len()))]
    async fn create_grocery_list(
        &self,
        identity: Identity,
        input: CreateGroceryListInput,
    ) -> Result<GroceryListWithItems, CoreError> {
        let user_id = identity.user_id()?;

        let mut ingredients: Vec<ExtractedIngredient> = Vec::with_capacity(input.ingredients.len());
        for ingredient in input.ingredients {
            let name = ingredient.name.trim();
            if name.is_empty()
                || ingredients
                    .iter()
                    .any(|i| i.name.trim().eq_ignore_ascii_case(name))
            {
                continue;
            }
            ingredients.push(ingredient);
        }

        if ingredients.is_empty() {
            return Err(CoreError::Validation(
                "at least one ingredient is required".to_string(),
            ));
        }

        let list = match self.grocery_list_repository.get_open_list(user_id).await? {
            Some(list) => list,
            None => {
                let name = input
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_GROCERY_LIST_NAME)
                    .to_string();
                self.grocery_list_repository
                    .create_list(GroceryList::new(user_id, name))
                    .await?
            }
        };

        let items: Vec<GroceryListItem> = ingredients
            .into_iter()
            .map(|i| GroceryListItem::from_ingredient(list.id, i, input.source_recipe_id))
            .collect();
        let items = self.grocery_list_repository.add_items(items).await?;
        debug!("Appended {} items to grocery list {}", items.len(), list.id);

        Ok(GroceryListWithItems { list, items })
    }

    #[instrument(skip(self))]
    async fn set_item_checked(
        &self,
        identity: Identity,
        item_id: Uuid,
        checked: bool,
    ) -> Result<GroceryListItem, CoreError> {
        let user_id = identity.user_id()?;

        self.grocery_list_repository
            .set_item_checked(item_id, user_id, checked)
            .await?
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip(self))]
    async fn set_list_status(
        &self,
        identity: Identity,
        list_id: Uuid,
        status: GroceryListStatus,
    ) -> Result<GroceryList, CoreError> {
        let user_id = identity.user_id()?;

        self.grocery_list_repository
            .update_list_status(list_id, user_id, status)
            .await?
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip(self))]
    async fn owned_ingredients(&self, identity: Identity) -> Result<Vec<String>, CoreError> {
        let user_id = identity.user_id()?;
        let names = self
            .grocery_list_repository
            .get_checked_item_names(user_id)
            .await?;

        let mut owned: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.trim();
            if !name.is_empty() && !owned.iter().any(|o| o.eq_ignore_ascii_case(name)) {
                owned.push(name.to_string());
            }
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        generation::ports::MockLLMClient,
        ingredients::entities::IngredientCategory,
        test_support::harness,
    };

    fn ingredient(name: &str) -> ExtractedIngredient {
        ExtractedIngredient {
            name: name.to_string(),
            quantity: Some(1.0),
            unit: Some("".to_string()),
            category: IngredientCategory::Vegetables,
            optional: false,
        }
    }

    fn input(names: &[&str]) -> CreateGroceryListInput {
        CreateGroceryListInput {
            name: Some("Weekend".to_string()),
            ingredients: names.iter().map(|n| ingredient(n)).collect(),
            source_recipe_id: None,
        }
    }

    #[tokio::test]
    async fn second_call_appends_to_the_open_list() {
        let harness = harness(MockLLMClient::new());
        let identity = Identity::User(Uuid::new_v4());

        let first = harness
            .service
            .create_grocery_list(identity, input(&["Onion", "onion ", "Garlic"]))
            .await
            .unwrap();
        let second = harness
            .service
            .create_grocery_list(identity, input(&["Leek"]))
            .await
            .unwrap();

        assert_eq!(first.list.name, "Weekend");
        assert_eq!(first.list.status, GroceryListStatus::Draft);
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.items[0].unit, None);
        assert_eq!(second.list.id, first.list.id);
        assert_eq!(harness.store.grocery_item_count(), 3);
    }

    #[tokio::test]
    async fn closed_list_is_not_reused() {
        let harness = harness(MockLLMClient::new());
        let identity = Identity::User(Uuid::new_v4());

        let first = harness
            .service
            .create_grocery_list(identity, input(&["Onion"]))
            .await
            .unwrap();
        harness
            .service
            .set_list_status(identity, first.list.id, GroceryListStatus::Completed)
            .await
            .unwrap();
        let second = harness
            .service
            .create_grocery_list(identity, input(&["Leek"]))
            .await
            .unwrap();

        assert_ne!(second.list.id, first.list.id);
    }

    #[tokio::test]
    async fn checked_items_become_owned_ingredients() {
        let harness = harness(MockLLMClient::new());
        let identity = Identity::User(Uuid::new_v4());

        let created = harness
            .service
            .create_grocery_list(identity, input(&["Rice", "Broccoli"]))
            .await
            .unwrap();
        harness
            .service
            .set_item_checked(identity, created.items[0].id, true)
            .await
            .unwrap();

        let owned = harness.service.owned_ingredients(identity).await.unwrap();

        assert_eq!(owned, vec!["Rice"]);
    }

    #[tokio::test]
    async fn other_users_items_are_not_found() {
        let harness = harness(MockLLMClient::new());
        let owner = Identity::User(Uuid::new_v4());
        let created = harness
            .service
            .create_grocery_list(owner, input(&["Rice"]))
            .await
            .unwrap();

        let result = harness
            .service
            .set_item_checked(Identity::User(Uuid::new_v4()), created.items[0].id, true)
            .await;

        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn blank_ingredients_are_rejected() {
        let harness = harness(MockLLMClient::new());

        let result = harness
            .service
            .create_grocery_list(Identity::User(Uuid::new_v4()), input(&[" "]))
            .await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
