use chrono::{TimeZone, Utc};

use crate::domain::recipe::entities::{Recipe, RecipeDifficulty, RecipeSource};
use crate::entity::recipes::Model as RecipeModel;

impl From<RecipeModel> for Recipe {
    fn from(model: RecipeModel) -> Self {
        Recipe {
            id: model.id,
            user_id: model.user_id,
            source: RecipeSource::from(model.source.as_str()),
            difficulty: RecipeDifficulty::from(model.difficulty.as_str()),
            title: model.title,
            full_text: model.full_text,
            cook_time_minutes: model.cook_time_minutes,
            calories: model.calories,
            protein: model.protein,
            carbs: model.carbs,
            fat: model.fat,
            is_public: model.is_public,
            created_at: Utc.from_utc_datetime(&model.created_at),
            updated_at: Utc.from_utc_datetime(&model.updated_at),
        }
    }
}
