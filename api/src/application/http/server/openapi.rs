use crate::application::http::{
    grocery::router::GroceryListApiDoc, health::router::HealthApiDoc,
    ingredients::router::IngredientsApiDoc, meal_plan::router::MealPlanApiDoc,
    recipe::router::RecipeApiDoc, suggestion::router::SuggestionApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cookwise API"
    ),
    nest(
        (path = "/suggestions", api = SuggestionApiDoc),
        (path = "/recipes", api = RecipeApiDoc),
        (path = "/ingredients", api = IngredientsApiDoc),
        (path = "/meal-plans", api = MealPlanApiDoc),
        (path = "/grocery-lists", api = GroceryListApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
