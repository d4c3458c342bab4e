use crate::domain::ingredients::entities::IngredientCategory;

pub const INGREDIENT_EXTRACTION_SYSTEM_PROMPT: &str = "You are a meticulous kitchen assistant \
that turns recipes into precise shopping lists. Respond only with data matching the schema.";

pub fn compose_ingredient_extraction_prompt(meal_name: &str, description: &str) -> String {
    let categories = IngredientCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!("List every ingredient needed to cook \"{}\".", meal_name.trim());

    let description = description.trim();
    if !description.is_empty() {
        prompt.push_str("\n\nRecipe text:\n");
        prompt.push_str(description);
    }

    prompt.push_str(&format!(
        "\n\nRules:\n\
        - Include every ingredient, including trace items such as salt, pepper, water and cooking oil.\n\
        - quantity is a number, or null when the recipe gives no amount.\n\
        - unit is a string such as \"g\", \"cup\" or \"tbsp\", or null when the ingredient is counted or unmeasured.\n\
        - category must be one of: {categories}.\n\
        - Set optional to true only for garnishes or ingredients the recipe marks as optional.\n\
        - If there is no ingredients section, infer the ingredients from the instructions and the dish name. \
        Return an empty list only when nothing at all can be inferred."
    ));

    prompt
}
