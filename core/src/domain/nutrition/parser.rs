use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParsedNutrition {
    pub calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
}

impl ParsedNutrition {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none() && self.protein.is_none() && self.carbs.is_none() && self.fat.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutritionField {
    Calories,
    Protein,
    Carbs,
    Fat,
}

/// Marker alternatives for each field. After the marker, only punctuation,
/// markdown emphasis and whitespace (plus an optional parenthetical such as
/// `(kcal)`) may precede the number, on the same line. A marker preceded by
/// one of [`SUB_TOTAL_QUALIFIERS`] names a sub-total and is skipped.
pub const NUTRITION_MARKERS: &[(NutritionField, &str)] = &[
    (NutritionField::Calories, "calories"),
    (NutritionField::Protein, "protein"),
    (NutritionField::Carbs, "carbohydrates|carbs"),
    (NutritionField::Fat, "fat"),
];

/// "Saturated Fat: 3g" is part of the fat total, not the total itself.
pub const SUB_TOTAL_QUALIFIERS: &str =
    "saturated|unsaturated|monounsaturated|polyunsaturated|trans|added";

struct Pattern {
    field: NutritionField,
    regex: Regex,
}

static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    NUTRITION_MARKERS
        .iter()
        .filter_map(|(field, marker)| {
            let source = format!(
                r"(?i)(?:\b({SUB_TOTAL_QUALIFIERS})[\s*_]+)?\b(?:{marker})\b[^\w\n]*(?:\([^)\n]*\)[^\w\n]*)?(\d{{1,3}}(?:,\d{{3}})+|\d+)"
            );
            Regex::new(&source).ok().map(|regex| Pattern {
                field: *field,
                regex,
            })
        })
        .collect()
});

static NUTRITION_HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*(?:#+\s*|\*\*)?\s*nutrition\b").ok());

pub fn parse_nutrition(text: &str) -> ParsedNutrition {
    let section = nutrition_section(text);
    let mut parsed = ParsedNutrition::default();

    for pattern in PATTERNS.iter() {
        let value = section
            .and_then(|s| first_value(&pattern.regex, s))
            .or_else(|| first_value(&pattern.regex, text));

        match pattern.field {
            NutritionField::Calories => parsed.calories = value,
            NutritionField::Protein => parsed.protein = value,
            NutritionField::Carbs => parsed.carbs = value,
            NutritionField::Fat => parsed.fat = value,
        }
    }

    parsed
}

fn nutrition_section(text: &str) -> Option<&str> {
    let heading = NUTRITION_HEADING.as_ref()?;
    heading.find(text).map(|m| &text[m.start()..])
}

/// First unqualified match. "1,200" reads as 1200.
fn first_value(regex: &Regex, text: &str) -> Option<i32> {
    regex
        .captures_iter(text)
        .find(|c| c.get(1).is_none())
        .and_then(|c| c.get(2))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}
