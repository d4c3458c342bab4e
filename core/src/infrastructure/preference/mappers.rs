use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::preference::entities::NutritionProfileRecord;
use crate::entity::nutrition_profiles::Model as NutritionProfileModel;

impl From<NutritionProfileModel> for NutritionProfileRecord {
    fn from(model: NutritionProfileModel) -> Self {
        NutritionProfileRecord {
            user_id: model.user_id,
            cuisine_ids: model.cuisine_ids.unwrap_or_default(),
            restriction_ids: model.restriction_ids.unwrap_or_default(),
            equipment_ids: model.equipment_ids.unwrap_or_default(),
            flavor_ids: model.flavor_ids.unwrap_or_default(),
            cooking_skill: model.cooking_skill,
            budget_level: model.budget_level,
            calorie_target: model.calorie_target,
            protein_target: model.protein_target,
            carb_target: model.carb_target,
            fat_target: model.fat_target,
            communication_tone: model.communication_tone,
            max_cooking_time_minutes: model.max_cooking_time_minutes,
        }
    }
}

/// Puts fetched `(id, name)` rows back into the order of `ids`.
/// Ids with no row are skipped.
pub fn order_labels(ids: &[Uuid], rows: Vec<(Uuid, String)>) -> Vec<String> {
    let mut by_id: HashMap<Uuid, String> = rows.into_iter().collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
