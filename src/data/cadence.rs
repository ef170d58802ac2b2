//! Hunt cadence repository backing the automated-play check.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, model::cadence::HuntCadence};

pub struct HuntCadenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HuntCadenceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, user_id: u64) -> Result<Option<HuntCadence>, AppError> {
        entity::prelude::HuntCadence::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
            .map(HuntCadence::from_entity)
            .transpose()
    }

    /// Stores the full cadence history for a user, replacing any previous row.
    pub async fn save(
        &self,
        user_id: u64,
        deltas: &[f64],
        last_hunt_at: DateTime<Utc>,
        hunt_count: i64,
    ) -> Result<(), AppError> {
        let existing = entity::prelude::HuntCadence::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;
        let deltas = serde_json::to_string(deltas)?;

        match existing {
            Some(existing) => {
                let mut active: entity::hunt_cadence::ActiveModel = existing.into();
                active.deltas = ActiveValue::Set(deltas);
                active.last_hunt_at = ActiveValue::Set(last_hunt_at);
                active.hunt_count = ActiveValue::Set(hunt_count);
                active.update(self.db).await?;
            }
            None => {
                entity::hunt_cadence::ActiveModel {
                    user_id: ActiveValue::Set(user_id.to_string()),
                    deltas: ActiveValue::Set(deltas),
                    last_hunt_at: ActiveValue::Set(last_hunt_at),
                    hunt_count: ActiveValue::Set(hunt_count),
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(())
    }
}
