use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Flattened, label-resolved view of a user's cooking preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserPreferenceProfile {
    pub cuisines: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub kitchen_equipment: Vec<String>,
    pub flavor_preferences: Vec<String>,
    pub food_dislikes: Vec<String>,
    pub cooking_skill: Option<CookingSkill>,
    pub budget_level: Option<BudgetLevel>,
    pub calorie_target: Option<i32>,
    pub protein_target: Option<i32>,
    pub carb_target: Option<i32>,
    pub fat_target: Option<i32>,
    pub communication_tone: Option<CommunicationTone>,
    pub max_cooking_time_minutes: Option<i32>,
}

impl UserPreferenceProfile {
    pub fn tone(&self) -> CommunicationTone {
        self.communication_tone.unwrap_or_default()
    }

    pub fn has_nutrition_goal(&self) -> bool {
        self.calorie_target.is_some()
            || self.protein_target.is_some()
            || self.carb_target.is_some()
            || self.fat_target.is_some()
    }
}

/// Raw profile row: foreign keys still unresolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionProfileRecord {
    pub user_id: Uuid,
    pub cuisine_ids: Vec<Uuid>,
    pub restriction_ids: Vec<Uuid>,
    pub equipment_ids: Vec<Uuid>,
    pub flavor_ids: Vec<Uuid>,
    pub cooking_skill: Option<String>,
    pub budget_level: Option<String>,
    pub calorie_target: Option<i32>,
    pub protein_target: Option<i32>,
    pub carb_target: Option<i32>,
    pub fat_target: Option<i32>,
    pub communication_tone: Option<String>,
    pub max_cooking_time_minutes: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    Cuisines,
    DietaryRestrictions,
    KitchenEquipment,
    FlavorProfiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CookingSkill {
    Beginner,
    Intermediate,
    Advanced,
}

impl CookingSkill {
    pub fn as_str(&self) -> &str {
        match self {
            CookingSkill::Beginner => "beginner",
            CookingSkill::Intermediate => "intermediate",
            CookingSkill::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(CookingSkill::Beginner),
            "intermediate" => Some(CookingSkill::Intermediate),
            "advanced" => Some(CookingSkill::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Low,
    Medium,
    High,
}

impl BudgetLevel {
    pub fn as_str(&self) -> &str {
        match self {
            BudgetLevel::Low => "low",
            BudgetLevel::Medium => "medium",
            BudgetLevel::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "budget" => Some(BudgetLevel::Low),
            "medium" | "moderate" => Some(BudgetLevel::Medium),
            "high" | "premium" => Some(BudgetLevel::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationTone {
    #[default]
    Friendly,
    Professional,
    Playful,
    Concise,
}

impl CommunicationTone {
    pub fn as_str(&self) -> &str {
        match self {
            CommunicationTone::Friendly => "friendly",
            CommunicationTone::Professional => "professional",
            CommunicationTone::Playful => "playful",
            CommunicationTone::Concise => "concise",
        }
    }
}

impl From<&str> for CommunicationTone {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => CommunicationTone::Professional,
            "playful" => CommunicationTone::Playful,
            "concise" => CommunicationTone::Concise,
            _ => CommunicationTone::Friendly,
        }
    }
}
