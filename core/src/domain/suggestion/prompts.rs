//! Turns a [`SuggestionRequest`] and an optional profile into prompt text.
//!
//! Every optional clause is left out entirely when its source is empty.
//! Dietary restrictions are the exception to any downgrading: whenever
//! present they are rendered with [`RESTRICTION_MARKER`].

use crate::domain::{
    preference::entities::{CommunicationTone, UserPreferenceProfile},
    suggestion::entities::{
        ExcludeNames, FlowType, IngredientSource, MealSuggestion, SuggestionRequest,
    },
};

pub const RESTRICTION_MARKER: &str = "CRITICAL";

pub const MIN_SUGGESTIONS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 5;

const RECIPE_FORMAT_CONTRACT: &str = "When writing a full recipe, use markdown with these \
sections in order: a short introduction, `## Ingredients` (a bulleted list with quantities), \
`## Instructions` (numbered steps), `## Tips`, and `## Nutrition Facts` (per serving), written \
exactly as:\n\
- **Calories**: <number>\n\
- **Protein**: <number>g\n\
- **Carbohydrates**: <number>g\n\
- **Fat**: <number>g";

pub fn compose_system_prompt(tone: CommunicationTone) -> String {
    let voice = match tone {
        CommunicationTone::Friendly => {
            "You are a warm, encouraging home-cooking assistant who talks like a friend that loves to cook."
        }
        CommunicationTone::Professional => {
            "You are a precise, professional culinary assistant. Keep the language clear and neutral."
        }
        CommunicationTone::Playful => {
            "You are a cheerful, playful cooking buddy. Light humour and the occasional food pun are welcome."
        }
        CommunicationTone::Concise => {
            "You are a no-nonsense cooking assistant. Keep sentences short and skip small talk."
        }
    };

    format!(
        "{voice}\n\nRespect every dietary restriction you are given without exception.\n\n{RECIPE_FORMAT_CONTRACT}"
    )
}

pub fn system_prompt_for(profile: Option<&UserPreferenceProfile>) -> String {
    compose_system_prompt(profile.map(UserPreferenceProfile::tone).unwrap_or_default())
}

pub fn compose_suggestions_prompt(
    request: &SuggestionRequest,
    profile: Option<&UserPreferenceProfile>,
    exclude_limit: Option<usize>,
) -> String {
    let opening = match (request.flow_type, request.meal_name()) {
        (FlowType::IngredientsNeeded, Some(meal)) => format!(
            "Suggest between {MIN_SUGGESTIONS} and {MAX_SUGGESTIONS} different takes on \"{meal}\" that I could cook."
        ),
        _ => format!(
            "Suggest between {MIN_SUGGESTIONS} and {MAX_SUGGESTIONS} different meal ideas that I could cook."
        ),
    };

    let mut lines = vec![opening];
    lines.extend(ingredient_clause(request));
    lines.extend(preference_clauses(request, profile));
    lines.extend(exclude_clause(&request.exclude_names, exclude_limit));
    lines.push(
        "For each suggestion give a name, a one-sentence description, an estimated total time \
        such as \"30 minutes\", a difficulty of Easy, Medium or Hard, a single emoji, and \
        approximate calories and grams of protein per serving."
            .to_string(),
    );

    lines.join("\n")
}

pub fn compose_recipe_prompt(
    request: &SuggestionRequest,
    profile: Option<&UserPreferenceProfile>,
    selected: Option<&MealSuggestion>,
) -> String {
    let opening = match (selected, request.meal_name()) {
        (Some(meal), _) if meal.description.trim().is_empty() => {
            format!("Write a complete recipe for \"{}\".", meal.name)
        }
        (Some(meal), _) => format!(
            "Write a complete recipe for \"{}\": {}",
            meal.name,
            meal.description.trim()
        ),
        (None, Some(name)) => format!("Write a complete recipe for \"{name}\"."),
        (None, None) => "Write a complete recipe for a meal I could cook today.".to_string(),
    };

    let mut lines = vec![opening];
    if request.flow_type == FlowType::IngredientsNeeded {
        lines.push(
            "List every ingredient I need to buy, with quantities, in the Ingredients section."
                .to_string(),
        );
    }
    lines.extend(ingredient_clause(request));
    lines.extend(preference_clauses(request, profile));

    lines.join("\n")
}

/// Prompt for one constrained-object recipe, as used by batch planning.
pub fn compose_structured_recipe_prompt(
    request: &SuggestionRequest,
    profile: Option<&UserPreferenceProfile>,
    avoid: &ExcludeNames,
) -> String {
    let opening = match request.meal_name() {
        Some(name) => format!("Create one complete recipe for \"{name}\"."),
        None => "Create one complete recipe for a meal I could cook.".to_string(),
    };

    let mut lines = vec![opening];
    lines.extend(ingredient_clause(request));
    lines.extend(preference_clauses(request, profile));
    if !avoid.is_empty() {
        lines.push(format!(
            "Do not repeat any of these dishes, which are already planned: {}.",
            avoid.iter().collect::<Vec<_>>().join(", ")
        ));
    }
    lines.push(
        "Give quantities as numbers where possible, numbered instructions without the numbers, \
        practical tips and per-serving nutrition values."
            .to_string(),
    );

    lines.join("\n")
}

fn ingredient_clause(request: &SuggestionRequest) -> Option<String> {
    let ingredients = request
        .ingredients
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty());

    match (request.ingredient_source, ingredients) {
        (Some(IngredientSource::UseMyIngredients), Some(list)) => Some(format!(
            "Ingredients I have: {list}. You do not need to use every listed ingredient; \
            choose the ones that work well together and assume common pantry staples are available."
        )),
        (Some(IngredientSource::UseMyIngredients), None) => None,
        (Some(IngredientSource::GoShopping), Some(list)) => Some(format!(
            "I am happy to go shopping for ingredients. I would like to include: {list}."
        )),
        (Some(IngredientSource::GoShopping), None) => {
            Some("I am happy to go shopping for ingredients.".to_string())
        }
        (None, Some(list)) => Some(format!("Ingredients to include: {list}.")),
        (None, None) => None,
    }
}

/// Request restrictions first, then profile ones, case-insensitively deduplicated.
pub fn merged_restrictions(
    request: &SuggestionRequest,
    profile: Option<&UserPreferenceProfile>,
) -> Vec<String> {
    let profile_restrictions = profile
        .map(|p| p.dietary_restrictions.as_slice())
        .unwrap_or_default();

    let mut merged: Vec<String> = Vec::new();
    for restriction in request
        .selected_restrictions
        .iter()
        .chain(profile_restrictions)
    {
        let restriction = restriction.trim();
        if restriction.is_empty()
            || merged
                .iter()
                .any(|r| r.eq_ignore_ascii_case(restriction))
        {
            continue;
        }
        merged.push(restriction.to_string());
    }
    merged
}

fn preference_clauses(
    request: &SuggestionRequest,
    profile: Option<&UserPreferenceProfile>,
) -> Vec<String> {
    let mut lines = Vec::new();

    let restrictions = merged_restrictions(request, profile);
    if !restrictions.is_empty() {
        lines.push(format!(
            "{RESTRICTION_MARKER} - dietary restrictions that must be strictly followed: {}. \
            Never include an ingredient that violates them.",
            restrictions.join(", ")
        ));
    }

    let cuisines = prefer_request(&request.selected_cuisines, profile.map(|p| &p.cuisines));
    push_list(&mut lines, "Preferred cuisines", cuisines);

    if let Some(spice) = non_blank(request.spice_level.as_deref()) {
        lines.push(format!("Spice level: {spice}."));
    }

    push_list(&mut lines, "Mood", &request.mood_tags);

    let equipment = prefer_request(
        &request.selected_equipment,
        profile.map(|p| &p.kitchen_equipment),
    );
    push_list(&mut lines, "Available kitchen equipment", equipment);

    let time_budget = request
        .cooking_time_minutes
        .or(profile.and_then(|p| p.max_cooking_time_minutes))
        .filter(|m| *m > 0);
    if let Some(minutes) = time_budget {
        lines.push(format!("Total cooking time must not exceed {minutes} minutes."));
    }

    if let Some(profile) = profile {
        if let Some(skill) = profile.cooking_skill {
            lines.push(format!("Cooking skill level: {}.", skill.as_str()));
        }
        if let Some(budget) = profile.budget_level {
            lines.push(format!("Budget level: {}.", budget.as_str()));
        }
        push_list(&mut lines, "Flavor preferences", &profile.flavor_preferences);
        push_list(&mut lines, "Avoid these disliked foods", &profile.food_dislikes);
        if let Some(goal) = nutrition_goal(profile) {
            lines.push(goal);
        }
    }

    if let Some(meal_type) = request.meal_type {
        lines.push(format!("Meal type: {}.", meal_type.as_str()));
    }

    if let Some(portions) = request.portions.filter(|p| *p > 0) {
        lines.push(format!("Servings: {portions}."));
    }

    if let Some(notes) = non_blank(request.extra_notes.as_deref()) {
        lines.push(format!("Additional notes: {notes}"));
    }

    lines
}

fn exclude_clause(names: &ExcludeNames, limit: Option<usize>) -> Option<String> {
    let shown = names.most_recent(limit);
    if shown.is_empty() {
        return None;
    }

    Some(format!(
        "Do not suggest any of these dishes, they have already been shown: {}. \
        Every suggestion must be a different dish.",
        shown.join(", ")
    ))
}

fn nutrition_goal(profile: &UserPreferenceProfile) -> Option<String> {
    if !profile.has_nutrition_goal() {
        return None;
    }

    let parts: Vec<String> = [
        profile.calorie_target.map(|v| format!("about {v} calories")),
        profile.protein_target.map(|v| format!("{v}g protein")),
        profile.carb_target.map(|v| format!("{v}g carbohydrates")),
        profile.fat_target.map(|v| format!("{v}g fat")),
    ]
    .into_iter()
    .flatten()
    .collect();

    Some(format!("Nutrition goal per serving: {}.", parts.join(", ")))
}

fn prefer_request<'a>(from_request: &'a [String], from_profile: Option<&'a Vec<String>>) -> &'a [String] {
    if from_request.iter().any(|v| !v.trim().is_empty()) {
        return from_request;
    }
    from_profile.map(Vec::as_slice).unwrap_or_default()
}

fn push_list(lines: &mut Vec<String>, label: &str, values: &[String]) {
    let values: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if !values.is_empty() {
        lines.push(format!("{label}: {}.", values.join(", ")));
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        meal_plan::entities::MealType,
        preference::entities::{BudgetLevel, CookingSkill},
        suggestion::entities::Difficulty,
    };

    fn what_to_cook() -> SuggestionRequest {
        SuggestionRequest::new(FlowType::WhatToCook)
    }

    #[test]
    fn restrictions_are_always_emphasized_and_verbatim() {
        let lists: [&[&str]; 3] = [
            &["vegetarian"],
            &["gluten-free", "nut-free"],
            &["Halal", "low sodium", "no shellfish"],
        ];

        for list in lists {
            let mut request = what_to_cook();
            request.selected_restrictions = list.iter().map(|s| s.to_string()).collect();

            for prompt in [
                compose_suggestions_prompt(&request, None, None),
                compose_recipe_prompt(&request, None, None),
            ] {
                assert!(prompt.contains(RESTRICTION_MARKER));
                assert!(prompt.contains("must be strictly followed"));
                for restriction in list {
                    assert!(prompt.contains(restriction), "missing {restriction}");
                }
            }
        }
    }

    #[test]
    fn profile_restrictions_merge_with_request_ones() {
        let mut request = what_to_cook();
        request.selected_restrictions = vec!["vegan".to_string()];
        let profile = UserPreferenceProfile {
            dietary_restrictions: vec!["Vegan".to_string(), "soy-free".to_string()],
            ..Default::default()
        };

        assert_eq!(
            merged_restrictions(&request, Some(&profile)),
            vec!["vegan", "soy-free"]
        );
    }

    #[test]
    fn empty_fields_produce_no_placeholder_clauses() {
        let prompt = compose_suggestions_prompt(&what_to_cook(), None, None);

        assert!(!prompt.contains(RESTRICTION_MARKER));
        assert!(!prompt.contains("N/A"));
        assert!(!prompt.contains("Preferred cuisines"));
        assert!(!prompt.contains("Spice level"));
        assert!(!prompt.contains("Mood"));
        assert!(!prompt.contains("kitchen equipment"));
        assert!(!prompt.contains("cooking time"));
        assert!(!prompt.contains("Do not suggest"));
        assert_eq!(prompt.lines().count(), 2);
    }

    #[test]
    fn use_my_ingredients_relaxes_usage() {
        let mut request = what_to_cook();
        request.ingredient_source = Some(IngredientSource::UseMyIngredients);
        request.ingredients = Some("chicken, rice, broccoli".to_string());

        let prompt = compose_suggestions_prompt(&request, None, None);

        assert!(prompt.contains("chicken, rice, broccoli"));
        assert!(prompt.contains("do not need to use every listed ingredient"));
    }

    #[test]
    fn request_selections_win_over_profile() {
        let mut request = what_to_cook();
        request.selected_cuisines = vec!["Mexican".to_string()];
        request.cooking_time_minutes = Some(20);
        let profile = UserPreferenceProfile {
            cuisines: vec!["Italian".to_string()],
            kitchen_equipment: vec!["air fryer".to_string()],
            max_cooking_time_minutes: Some(60),
            cooking_skill: Some(CookingSkill::Beginner),
            budget_level: Some(BudgetLevel::Low),
            calorie_target: Some(550),
            protein_target: Some(35),
            ..Default::default()
        };

        let prompt = compose_suggestions_prompt(&request, Some(&profile), None);

        assert!(prompt.contains("Preferred cuisines: Mexican."));
        assert!(!prompt.contains("Italian"));
        assert!(prompt.contains("Available kitchen equipment: air fryer."));
        assert!(prompt.contains("must not exceed 20 minutes"));
        assert!(prompt.contains("Cooking skill level: beginner."));
        assert!(prompt.contains("Budget level: low."));
        assert!(prompt.contains("about 550 calories, 35g protein"));
        assert!(!prompt.contains("carbohydrates"));
    }

    #[test]
    fn exclude_clause_lists_every_shown_name() {
        let mut request = what_to_cook();
        request.exclude_names = ["Pad Thai", "Tacos", "Risotto"].into_iter().collect();

        let prompt = compose_suggestions_prompt(&request, None, None);

        assert!(prompt.contains("Pad Thai, Tacos, Risotto"));
        assert!(prompt.contains("different dish"));
    }

    #[test]
    fn exclude_limit_renders_most_recent_names_only() {
        let mut request = what_to_cook();
        request.exclude_names = ["Pad Thai", "Tacos", "Risotto"].into_iter().collect();

        let prompt = compose_suggestions_prompt(&request, None, Some(2));

        assert!(!prompt.contains("Pad Thai"));
        assert!(prompt.contains("Tacos, Risotto"));
        assert_eq!(request.exclude_names.len(), 3);
    }

    #[test]
    fn recipe_prompt_is_seeded_with_selected_meal() {
        let mut request = what_to_cook();
        request.meal_type = Some(MealType::Dinner);
        let selected = MealSuggestion {
            name: "Mushroom Stroganoff".to_string(),
            description: "Creamy mushrooms over egg noodles.".to_string(),
            estimated_time: "35 minutes".to_string(),
            difficulty: Difficulty::Medium,
            emoji: "🍄".to_string(),
            calories: None,
            protein: None,
        };

        let prompt = compose_recipe_prompt(&request, None, Some(&selected));

        assert!(prompt.starts_with(
            "Write a complete recipe for \"Mushroom Stroganoff\": Creamy mushrooms over egg noodles."
        ));
        assert!(prompt.contains("Meal type: dinner."));
    }

    #[test]
    fn ingredients_needed_flow_asks_for_a_shopping_list() {
        let mut request = SuggestionRequest::new(FlowType::IngredientsNeeded);
        request.meal_name = Some("Lasagna".to_string());
        request.portions = Some(6);

        let prompt = compose_recipe_prompt(&request, None, None);

        assert!(prompt.contains("\"Lasagna\""));
        assert!(prompt.contains("every ingredient I need to buy"));
        assert!(prompt.contains("Servings: 6."));
    }

    #[test]
    fn system_prompt_defaults_to_friendly() {
        let default = system_prompt_for(None);

        assert_eq!(default, compose_system_prompt(CommunicationTone::Friendly));
        assert!(default.contains("**Calories**"));
        assert_ne!(default, compose_system_prompt(CommunicationTone::Concise));
    }
}
