//! Hourly activity counter repository.
//!
//! This module provides the `ActivityBucketRepository`, a hash-like store keyed by
//! subject and hour. Each bucket holds a `{code: count}` record. Increments are a plain
//! read-modify-write with last-write-wins semantics; the bucket key includes the
//! subject, so concurrent writers for different users never touch the same row.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    error::AppError,
    model::activity::{hour_bucket, CounterRecord, Subject},
};

/// Repository providing database operations for hourly counter records.
pub struct ActivityBucketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityBucketRepository<'a> {
    /// Creates a new ActivityBucketRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ActivityBucketRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_entity(
        &self,
        subject: Subject,
        hour: DateTime<Utc>,
    ) -> Result<Option<entity::activity_bucket::Model>, AppError> {
        let entity = entity::prelude::ActivityBucket::find()
            .filter(entity::activity_bucket::Column::GuildId.eq(subject.guild_id.to_string()))
            .filter(entity::activity_bucket::Column::UserId.eq(subject.user_id.to_string()))
            .filter(entity::activity_bucket::Column::Hour.eq(hour))
            .one(self.db)
            .await?;

        Ok(entity)
    }

    /// Gets the counter record for one subject and hour.
    ///
    /// # Arguments
    /// - `subject` - Guild member whose counters to read
    /// - `hour` - Any timestamp within the wanted hour
    ///
    /// # Returns
    /// - `Ok(Some(CounterRecord))` - Bucket exists
    /// - `Ok(None)` - Nothing recorded in that hour
    /// - `Err(AppError)` - Database error or malformed stored record
    pub async fn get(
        &self,
        subject: Subject,
        hour: DateTime<Utc>,
    ) -> Result<Option<CounterRecord>, AppError> {
        self.find_entity(subject, hour_bucket(hour))
            .await?
            .map(CounterRecord::from_entity)
            .transpose()
    }

    /// Gets every counter record for a subject, oldest hour first.
    ///
    /// # Arguments
    /// - `subject` - Guild member whose buckets to read
    ///
    /// # Returns
    /// - `Ok(Vec<CounterRecord>)` - All buckets (empty if none)
    /// - `Err(AppError)` - Database error or malformed stored record
    pub async fn get_all(&self, subject: Subject) -> Result<Vec<CounterRecord>, AppError> {
        let entities = entity::prelude::ActivityBucket::find()
            .filter(entity::activity_bucket::Column::GuildId.eq(subject.guild_id.to_string()))
            .filter(entity::activity_bucket::Column::UserId.eq(subject.user_id.to_string()))
            .order_by_asc(entity::activity_bucket::Column::Hour)
            .all(self.db)
            .await?;

        entities.into_iter().map(CounterRecord::from_entity).collect()
    }

    /// Replaces the whole counter record for a subject and hour.
    ///
    /// Creates the bucket if it does not exist yet.
    ///
    /// # Arguments
    /// - `subject` - Guild member whose bucket to write
    /// - `hour` - Any timestamp within the target hour
    /// - `counts` - New action code to count mapping
    ///
    /// # Returns
    /// - `Ok(CounterRecord)` - The stored record
    /// - `Err(AppError)` - Database or serialisation error
    pub async fn set(
        &self,
        subject: Subject,
        hour: DateTime<Utc>,
        counts: BTreeMap<u16, i64>,
    ) -> Result<CounterRecord, AppError> {
        let hour = hour_bucket(hour);
        let json = CounterRecord::counts_json(&counts)?;

        let entity = match self.find_entity(subject, hour).await? {
            Some(existing) => {
                let mut active: entity::activity_bucket::ActiveModel = existing.into();
                active.counts = ActiveValue::Set(json);
                active.update(self.db).await?
            }
            None => {
                entity::activity_bucket::ActiveModel {
                    id: ActiveValue::NotSet,
                    guild_id: ActiveValue::Set(subject.guild_id.to_string()),
                    user_id: ActiveValue::Set(subject.user_id.to_string()),
                    hour: ActiveValue::Set(hour),
                    counts: ActiveValue::Set(json),
                }
                .insert(self.db)
                .await?
            }
        };

        CounterRecord::from_entity(entity)
    }

    /// Increments one action code within a subject's hour bucket.
    ///
    /// # Arguments
    /// - `subject` - Guild member whose bucket to update
    /// - `at` - Timestamp of the action; truncated to its hour
    /// - `code` - Action code to increment
    ///
    /// # Returns
    /// - `Ok(i64)` - Count for `code` after the increment
    /// - `Err(AppError)` - Database error or malformed stored record
    pub async fn increment(
        &self,
        subject: Subject,
        at: DateTime<Utc>,
        code: u16,
    ) -> Result<i64, AppError> {
        let mut counts = self
            .get(subject, at)
            .await?
            .map(|record| record.counts)
            .unwrap_or_default();

        let count = counts.entry(code).or_insert(0);
        *count += 1;
        let new_count = *count;

        self.set(subject, at, counts).await?;

        Ok(new_count)
    }

    /// Deletes every bucket for a subject.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of buckets removed
    /// - `Err(AppError)` - Database error
    pub async fn delete_all(&self, subject: Subject) -> Result<u64, AppError> {
        let result = entity::prelude::ActivityBucket::delete_many()
            .filter(entity::activity_bucket::Column::GuildId.eq(subject.guild_id.to_string()))
            .filter(entity::activity_bucket::Column::UserId.eq(subject.user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
