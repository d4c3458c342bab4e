use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, nutrition::ParsedNutrition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub full_text: String,
    pub source: RecipeSource,
    pub cook_time_minutes: Option<i32>,
    pub difficulty: RecipeDifficulty,
    pub calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub user_id: Uuid,
    pub title: String,
    pub full_text: String,
    pub cook_time_minutes: Option<i32>,
    pub difficulty: RecipeDifficulty,
    pub nutrition: ParsedNutrition,
    pub is_public: bool,
}

impl Recipe {
    pub fn new(config: RecipeConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id: config.user_id,
            title: config.title,
            full_text: config.full_text,
            source: RecipeSource::AiGenerated,
            cook_time_minutes: config.cook_time_minutes,
            difficulty: config.difficulty,
            calories: config.nutrition.calories,
            protein: config.nutrition.protein,
            carbs: config.nutrition.carbs,
            fat: config.nutrition.fat,
            is_public: config.is_public,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn nutrition(&self) -> ParsedNutrition {
        ParsedNutrition {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecipeSource {
    AiGenerated,
    Manual,
}

impl RecipeSource {
    pub fn as_str(&self) -> &str {
        match self {
            RecipeSource::AiGenerated => "ai_generated",
            RecipeSource::Manual => "manual",
        }
    }
}

impl From<&str> for RecipeSource {
    fn from(s: &str) -> Self {
        match s {
            "manual" => RecipeSource::Manual,
            _ => RecipeSource::AiGenerated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecipeDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl RecipeDifficulty {
    pub fn as_str(&self) -> &str {
        match self {
            RecipeDifficulty::Beginner => "beginner",
            RecipeDifficulty::Intermediate => "intermediate",
            RecipeDifficulty::Advanced => "advanced",
        }
    }
}

impl From<&str> for RecipeDifficulty {
    fn from(s: &str) -> Self {
        match s {
            "beginner" => RecipeDifficulty::Beginner,
            "advanced" => RecipeDifficulty::Advanced,
            _ => RecipeDifficulty::Intermediate,
        }
    }
}
