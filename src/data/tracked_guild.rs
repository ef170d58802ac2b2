//! Guild allow-list repository.
//!
//! Only guilds in this table have their members' hunts tracked.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, util::parse::parse_u64_from_string};

pub struct TrackedGuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TrackedGuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all_ids(&self) -> Result<Vec<u64>, AppError> {
        let entities = entity::prelude::TrackedGuild::find().all(self.db).await?;

        entities
            .into_iter()
            .map(|entity| parse_u64_from_string(entity.guild_id))
            .collect()
    }

    /// Adds a guild to the allow-list.
    ///
    /// # Returns
    /// - `Ok(true)` - Guild was added
    /// - `Ok(false)` - Guild was already tracked
    pub async fn add(&self, guild_id: u64) -> Result<bool, AppError> {
        let existing = entity::prelude::TrackedGuild::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        entity::tracked_guild::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }
}
