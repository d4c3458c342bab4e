use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{meal_plan::entities::MealType, recipe::entities::RecipeDifficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FlowType {
    WhatToCook,
    IngredientsNeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum IngredientSource {
    UseMyIngredients,
    GoShopping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl From<Difficulty> for RecipeDifficulty {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Easy => RecipeDifficulty::Beginner,
            Difficulty::Medium => RecipeDifficulty::Intermediate,
            Difficulty::Hard => RecipeDifficulty::Advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestion {
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub difficulty: Difficulty,
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<i32>,
}

/// Names already shown to the user during one session.
///
/// Only ever grows; insertion order is kept so prompts list names in the
/// order they were shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExcludeNames(Vec<String>);

impl ExcludeNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    pub fn extend_from_suggestions(&mut self, suggestions: &[MealSuggestion]) {
        for suggestion in suggestions {
            self.insert(&suggestion.name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The `limit` most recently shown names, oldest first.
    pub fn most_recent(&self, limit: Option<usize>) -> &[String] {
        match limit {
            Some(limit) if limit < self.0.len() => &self.0[self.0.len() - limit..],
            _ => &self.0,
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExcludeNames {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut names = ExcludeNames::new();
        for name in iter {
            names.insert(name.as_ref());
        }
        names
    }
}

impl From<Vec<String>> for ExcludeNames {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<ExcludeNames> for Vec<String> {
    fn from(names: ExcludeNames) -> Self {
        names.0
    }
}

/// Everything the wizard collected for one suggestion cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub flow_type: FlowType,
    #[serde(default)]
    pub ingredient_source: Option<IngredientSource>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub selected_cuisines: Vec<String>,
    #[serde(default)]
    pub selected_restrictions: Vec<String>,
    #[serde(default)]
    pub selected_equipment: Vec<String>,
    #[serde(default)]
    pub spice_level: Option<String>,
    #[serde(default)]
    pub mood_tags: Vec<String>,
    #[serde(default)]
    pub cooking_time_minutes: Option<i32>,
    #[serde(default)]
    pub meal_type: Option<MealType>,
    #[serde(default)]
    pub portions: Option<i32>,
    #[serde(default)]
    pub meal_name: Option<String>,
    #[serde(default)]
    pub extra_notes: Option<String>,
    #[serde(default)]
    pub exclude_names: ExcludeNames,
}

impl SuggestionRequest {
    pub fn new(flow_type: FlowType) -> Self {
        Self {
            flow_type,
            ingredient_source: None,
            ingredients: None,
            selected_cuisines: Vec::new(),
            selected_restrictions: Vec::new(),
            selected_equipment: Vec::new(),
            spice_level: None,
            mood_tags: Vec::new(),
            cooking_time_minutes: None,
            meal_type: None,
            portions: None,
            meal_name: None,
            extra_notes: None,
            exclude_names: ExcludeNames::new(),
        }
    }

    pub fn meal_name(&self) -> Option<&str> {
        self.meal_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}
