//! Per-guild command prefix repository.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

pub struct GuildPrefixRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildPrefixRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, guild_id: u64) -> Result<Option<String>, DbErr> {
        let entity = entity::prelude::GuildPrefix::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(|entity| entity.prefix))
    }

    /// Creates or replaces the prefix for a guild.
    pub async fn set(&self, guild_id: u64, prefix: &str) -> Result<(), DbErr> {
        let existing = entity::prelude::GuildPrefix::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        match existing {
            Some(existing) => {
                let mut active: entity::guild_prefix::ActiveModel = existing.into();
                active.prefix = ActiveValue::Set(prefix.to_string());
                active.update(self.db).await?;
            }
            None => {
                entity::guild_prefix::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    prefix: ActiveValue::Set(prefix.to_string()),
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(())
    }
}
