use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{entities::Recipe, ports::RecipeRepository},
};
use crate::entity::recipes::{ActiveModel as RecipeActiveModel, Entity as RecipeEntity};

#[derive(Debug, Clone)]
pub struct PostgresRecipeRepository {
    pub db: DatabaseConnection,
}

impl PostgresRecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RecipeRepository for PostgresRecipeRepository {
    async fn create_recipe(&self, recipe: Recipe) -> Result<Recipe, CoreError> {
        let created = RecipeEntity::insert(RecipeActiveModel {
            id: Set(recipe.id),
            user_id: Set(recipe.user_id),
            title: Set(recipe.title),
            full_text: Set(recipe.full_text),
            source: Set(recipe.source.as_str().to_string()),
            cook_time_minutes: Set(recipe.cook_time_minutes),
            difficulty: Set(recipe.difficulty.as_str().to_string()),
            calories: Set(recipe.calories),
            protein: Set(recipe.protein),
            carbs: Set(recipe.carbs),
            fat: Set(recipe.fat),
            is_public: Set(recipe.is_public),
            created_at: Set(recipe.created_at.naive_utc()),
            updated_at: Set(recipe.updated_at.naive_utc()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(Recipe::from)
        .map_err(|e| {
            error!("Failed to create recipe: {}", e);
            CoreError::Persistence(e.to_string())
        })?;

        Ok(created)
    }
}
