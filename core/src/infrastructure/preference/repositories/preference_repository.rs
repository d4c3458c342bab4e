use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    preference::{
        entities::{LookupTable, NutritionProfileRecord},
        ports::PreferenceRepository,
    },
};
use crate::entity::{
    cuisines, dietary_restrictions, flavor_profiles, food_dislikes, kitchen_equipment,
    nutrition_profiles,
};
use crate::infrastructure::preference::mappers::order_labels;

#[derive(Debug, Clone)]
pub struct PostgresPreferenceRepository {
    pub db: DatabaseConnection,
}

impl PostgresPreferenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Every lookup table shares the `{id, name}` shape.
macro_rules! fetch_labels {
    ($db:expr, $table:ident, $ids:expr) => {
        $table::Entity::find()
            .filter($table::Column::Id.is_in($ids.iter().copied()))
            .all($db)
            .await
            .map(|rows| {
                rows.into_iter()
                    .map(|row| (row.id, row.name))
                    .collect::<Vec<(Uuid, String)>>()
            })
    };
}

impl PreferenceRepository for PostgresPreferenceRepository {
    async fn get_nutrition_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NutritionProfileRecord>, CoreError> {
        let record = nutrition_profiles::Entity::find()
            .filter(nutrition_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get nutrition profile: {}", e);
                CoreError::InternalServerError
            })?
            .map(NutritionProfileRecord::from);

        Ok(record)
    }

    async fn get_labels(&self, table: LookupTable, ids: Vec<Uuid>) -> Result<Vec<String>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = match table {
            LookupTable::Cuisines => fetch_labels!(&self.db, cuisines, ids),
            LookupTable::DietaryRestrictions => fetch_labels!(&self.db, dietary_restrictions, ids),
            LookupTable::KitchenEquipment => fetch_labels!(&self.db, kitchen_equipment, ids),
            LookupTable::FlavorProfiles => fetch_labels!(&self.db, flavor_profiles, ids),
        }
        .map_err(|e| {
            error!("Failed to resolve {:?} labels: {}", table, e);
            CoreError::InternalServerError
        })?;

        Ok(order_labels(&ids, rows))
    }

    async fn get_food_dislikes(&self, user_id: Uuid) -> Result<Vec<String>, CoreError> {
        let dislikes = food_dislikes::Entity::find()
            .filter(food_dislikes::Column::UserId.eq(user_id))
            .order_by_asc(food_dislikes::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get food dislikes: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(|row| row.name)
            .collect();

        Ok(dislikes)
    }
}
