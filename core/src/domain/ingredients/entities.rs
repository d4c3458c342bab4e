use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExtractedIngredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: IngredientCategory,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Proteins,
    Vegetables,
    Fruits,
    Dairy,
    Grains,
    Oils,
    Spices,
    Condiments,
    #[default]
    #[serde(other)]
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 9] = [
        IngredientCategory::Proteins,
        IngredientCategory::Vegetables,
        IngredientCategory::Fruits,
        IngredientCategory::Dairy,
        IngredientCategory::Grains,
        IngredientCategory::Oils,
        IngredientCategory::Spices,
        IngredientCategory::Condiments,
        IngredientCategory::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            IngredientCategory::Proteins => "proteins",
            IngredientCategory::Vegetables => "vegetables",
            IngredientCategory::Fruits => "fruits",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Grains => "grains",
            IngredientCategory::Oils => "oils",
            IngredientCategory::Spices => "spices",
            IngredientCategory::Condiments => "condiments",
            IngredientCategory::Other => "other",
        }
    }
}

impl From<&str> for IngredientCategory {
    fn from(s: &str) -> Self {
        IngredientCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .unwrap_or_default()
    }
}

impl ExtractedIngredient {
    /// "2 cups rice", "salt", "1.5 onion".
    pub fn display_line(&self) -> String {
        let quantity = self.quantity.map(|q| {
            if q.fract() == 0.0 {
                format!("{}", q as i64)
            } else {
                format!("{q}")
            }
        });

        let mut parts: Vec<String> = Vec::new();
        parts.extend(quantity);
        parts.extend(self.unit.clone().filter(|u| !u.trim().is_empty()));
        parts.push(self.name.clone());

        let line = parts.join(" ");
        if self.optional {
            format!("{line} (optional)")
        } else {
            line
        }
    }
}
