use chrono::NaiveDate;

use crate::domain::{
    meal_plan::{
        entities::MealType,
        value_objects::{SaveRecipeInput, SaveRecipeOutcome},
    },
    suggestion::{
        entities::{ExcludeNames, FlowType, IngredientSource, MealSuggestion, SuggestionRequest},
        value_objects::GetFullRecipeInput,
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceSelection {
    pub cuisines: Vec<String>,
    pub restrictions: Vec<String>,
    pub equipment: Vec<String>,
    pub spice_level: Option<String>,
    pub mood_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsSelection {
    pub cooking_time_minutes: Option<i32>,
    pub meal_type: Option<MealType>,
    pub extra_notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveOptions {
    /// Falls back to the request's meal type, then dinner.
    pub meal_type: Option<MealType>,
    pub plan_date: Option<NaiveDate>,
    /// Falls back to the request's portions.
    pub servings: Option<i32>,
    pub is_public: bool,
}

/// Which generation a failed state retries.
#[derive(Debug, Clone, PartialEq)]
pub enum FailedGeneration {
    Suggestions,
    Recipe { selected: Option<MealSuggestion> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Keeps the names already shown when the user steps back to the start.
    Initial {
        exclude_names: ExcludeNames,
    },
    IngredientSource {
        request: SuggestionRequest,
    },
    Ingredients {
        request: SuggestionRequest,
    },
    Preferences {
        request: SuggestionRequest,
    },
    Details {
        request: SuggestionRequest,
    },
    Portions {
        request: SuggestionRequest,
    },
    GeneratingSuggestions {
        request: SuggestionRequest,
    },
    Picking {
        request: SuggestionRequest,
        suggestions: Vec<MealSuggestion>,
    },
    GeneratingRecipe {
        request: SuggestionRequest,
        suggestions: Vec<MealSuggestion>,
        selected: Option<MealSuggestion>,
        buffer: String,
    },
    RecipeReady {
        request: SuggestionRequest,
        suggestions: Vec<MealSuggestion>,
        selected: Option<MealSuggestion>,
        recipe_text: String,
        save_error: Option<String>,
    },
    GenerationFailed {
        request: SuggestionRequest,
        suggestions: Vec<MealSuggestion>,
        failed: FailedGeneration,
        error: String,
    },
    Saving {
        request: SuggestionRequest,
        suggestions: Vec<MealSuggestion>,
        selected: Option<MealSuggestion>,
        recipe_text: String,
    },
    Closed {
        saved: Option<SaveRecipeOutcome>,
    },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Initial {
            exclude_names: ExcludeNames::default(),
        }
    }
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Initial { .. } => "initial",
            SessionState::IngredientSource { .. } => "ingredient_source",
            SessionState::Ingredients { .. } => "ingredients",
            SessionState::Preferences { .. } => "preferences",
            SessionState::Details { .. } => "details",
            SessionState::Portions { .. } => "portions",
            SessionState::GeneratingSuggestions { .. } => "generating_suggestions",
            SessionState::Picking { .. } => "picking",
            SessionState::GeneratingRecipe { .. } => "generating_recipe",
            SessionState::RecipeReady { .. } => "recipe_ready",
            SessionState::GenerationFailed { .. } => "generation_failed",
            SessionState::Saving { .. } => "saving",
            SessionState::Closed { .. } => "closed",
        }
    }

    pub fn request(&self) -> Option<&SuggestionRequest> {
        match self {
            SessionState::Initial { .. } | SessionState::Closed { .. } => None,
            SessionState::IngredientSource { request }
            | SessionState::Ingredients { request }
            | SessionState::Preferences { request }
            | SessionState::Details { request }
            | SessionState::Portions { request }
            | SessionState::GeneratingSuggestions { request }
            | SessionState::Picking { request, .. }
            | SessionState::GeneratingRecipe { request, .. }
            | SessionState::RecipeReady { request, .. }
            | SessionState::GenerationFailed { request, .. }
            | SessionState::Saving { request, .. } => Some(request),
        }
    }

    /// Names shown so far. Empty before the first batch and after closing.
    pub fn exclude_names(&self) -> ExcludeNames {
        match self {
            SessionState::Initial { exclude_names } => exclude_names.clone(),
            state => state
                .request()
                .map(|r| r.exclude_names.clone())
                .unwrap_or_default(),
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(
            self,
            SessionState::GeneratingSuggestions { .. } | SessionState::GeneratingRecipe { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Start(FlowType),
    ChooseIngredientSource(Option<IngredientSource>),
    SetIngredients(String),
    SetPreferences(PreferenceSelection),
    SetDetails(DetailsSelection),
    SetPortions {
        meal_name: String,
        portions: Option<i32>,
    },
    SuggestionsReceived(Vec<MealSuggestion>),
    SuggestionsFailed(String),
    Regenerate,
    Pick(usize),
    RecipeChunk(String),
    RecipeCompleted,
    RecipeFailed(String),
    /// The stream was stopped through its cancel handle.
    RecipeCancelled,
    Retry,
    Save(SaveOptions),
    SaveCompleted(SaveRecipeOutcome),
    SaveFailed(String),
    Back,
    Close,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Start(_) => "start",
            SessionEvent::ChooseIngredientSource(_) => "choose_ingredient_source",
            SessionEvent::SetIngredients(_) => "set_ingredients",
            SessionEvent::SetPreferences(_) => "set_preferences",
            SessionEvent::SetDetails(_) => "set_details",
            SessionEvent::SetPortions { .. } => "set_portions",
            SessionEvent::SuggestionsReceived(_) => "suggestions_received",
            SessionEvent::SuggestionsFailed(_) => "suggestions_failed",
            SessionEvent::Regenerate => "regenerate",
            SessionEvent::Pick(_) => "pick",
            SessionEvent::RecipeChunk(_) => "recipe_chunk",
            SessionEvent::RecipeCompleted => "recipe_completed",
            SessionEvent::RecipeFailed(_) => "recipe_failed",
            SessionEvent::RecipeCancelled => "recipe_cancelled",
            SessionEvent::Retry => "retry",
            SessionEvent::Save(_) => "save",
            SessionEvent::SaveCompleted(_) => "save_completed",
            SessionEvent::SaveFailed(_) => "save_failed",
            SessionEvent::Back => "back",
            SessionEvent::Close => "close",
        }
    }
}

/// Async work the driver must start after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    FetchSuggestions(SuggestionRequest),
    StreamRecipe(GetFullRecipeInput),
    CancelGeneration,
    SaveRecipe(SaveRecipeInput),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effect: Option<SessionEffect>,
}

impl Transition {
    pub fn to(state: SessionState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    pub fn with(state: SessionState, effect: SessionEffect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}
