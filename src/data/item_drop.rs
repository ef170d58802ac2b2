//! Item drop counter repository.
//!
//! Counts items scraped from hunt confirmations per subject, hour and item name.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::activity::{hour_bucket, Subject};

/// One stored (hour, item, count) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDropCount {
    pub hour: DateTime<Utc>,
    pub item: String,
    pub count: i64,
}

pub struct ItemDropRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ItemDropRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Increments the count of `item` in the subject's bucket for `at`'s hour.
    pub async fn increment(
        &self,
        subject: Subject,
        at: DateTime<Utc>,
        item: &str,
    ) -> Result<i64, DbErr> {
        let hour = hour_bucket(at);
        let existing = entity::prelude::ItemDrop::find()
            .filter(entity::item_drop::Column::GuildId.eq(subject.guild_id.to_string()))
            .filter(entity::item_drop::Column::UserId.eq(subject.user_id.to_string()))
            .filter(entity::item_drop::Column::Hour.eq(hour))
            .filter(entity::item_drop::Column::Item.eq(item))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let count = existing.count + 1;
                let mut active: entity::item_drop::ActiveModel = existing.into();
                active.count = ActiveValue::Set(count);
                active.update(self.db).await?
            }
            None => {
                entity::item_drop::ActiveModel {
                    id: ActiveValue::NotSet,
                    guild_id: ActiveValue::Set(subject.guild_id.to_string()),
                    user_id: ActiveValue::Set(subject.user_id.to_string()),
                    hour: ActiveValue::Set(hour),
                    item: ActiveValue::Set(item.to_string()),
                    count: ActiveValue::Set(1),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(entity.count)
    }

    /// Gets every drop row for a subject, oldest hour first.
    pub async fn get_all(&self, subject: Subject) -> Result<Vec<ItemDropCount>, DbErr> {
        let entities = entity::prelude::ItemDrop::find()
            .filter(entity::item_drop::Column::GuildId.eq(subject.guild_id.to_string()))
            .filter(entity::item_drop::Column::UserId.eq(subject.user_id.to_string()))
            .order_by_asc(entity::item_drop::Column::Hour)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| ItemDropCount {
                hour: entity.hour,
                item: entity.item,
                count: entity.count,
            })
            .collect())
    }

    pub async fn delete_all(&self, subject: Subject) -> Result<u64, DbErr> {
        let result = entity::prelude::ItemDrop::delete_many()
            .filter(entity::item_drop::Column::GuildId.eq(subject.guild_id.to_string()))
            .filter(entity::item_drop::Column::UserId.eq(subject.user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
