use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ingredients::entities::ExtractedIngredient,
    nutrition::ParsedNutrition,
    suggestion::entities::{Difficulty, MealSuggestion, SuggestionRequest},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetFullRecipeInput {
    pub request: SuggestionRequest,
    /// Absent on the ingredients-needed path, where the request's meal name
    /// seeds the recipe instead.
    #[serde(default)]
    pub selected: Option<MealSuggestion>,
}

/// Constrained-object form of a full recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecipe {
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub difficulty: Difficulty,
    pub servings: i32,
    pub ingredients: Vec<ExtractedIngredient>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub nutrition: ParsedNutrition,
}

impl StructuredRecipe {
    /// Renders the recipe with the same headings and nutrition lines the
    /// streamed markdown uses, so both forms go through one save path.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.name);
        if !self.description.trim().is_empty() {
            out.push_str(self.description.trim());
            out.push_str("\n\n");
        }
        out.push_str(&format!(
            "**Time**: {} | **Difficulty**: {} | **Servings**: {}\n\n",
            self.estimated_time,
            self.difficulty.as_str(),
            self.servings
        ));

        out.push_str("## Ingredients\n\n");
        for ingredient in &self.ingredients {
            out.push_str(&format!("- {}\n", ingredient.display_line()));
        }

        out.push_str("\n## Instructions\n\n");
        for (i, step) in self.instructions.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step.trim()));
        }

        if !self.tips.is_empty() {
            out.push_str("\n## Tips\n\n");
            for tip in &self.tips {
                out.push_str(&format!("- {}\n", tip.trim()));
            }
        }

        let nutrition = [
            ("Calories", self.nutrition.calories, ""),
            ("Protein", self.nutrition.protein, "g"),
            ("Carbohydrates", self.nutrition.carbs, "g"),
            ("Fat", self.nutrition.fat, "g"),
        ];
        if !self.nutrition.is_empty() {
            out.push_str("\n## Nutrition Facts\n\n");
            for (label, value, unit) in nutrition {
                if let Some(value) = value {
                    out.push_str(&format!("- **{label}**: {value}{unit}\n"));
                }
            }
        }

        out
    }

    pub fn as_suggestion(&self) -> MealSuggestion {
        MealSuggestion {
            name: self.name.clone(),
            description: self.description.clone(),
            estimated_time: self.estimated_time.clone(),
            difficulty: self.difficulty,
            emoji: "🍽️".to_string(),
            calories: self.nutrition.calories,
            protein: self.nutrition.protein,
        }
    }
}
