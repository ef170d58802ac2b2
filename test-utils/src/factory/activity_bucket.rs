//! Hourly counter row factory.
//!
//! Writes the `counts` column verbatim, which lets tests seed malformed records that
//! the repositories would never produce themselves.

use crate::factory::helpers::next_id;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating counter rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let row = ActivityBucketFactory::new(&db)
///     .subject(1, 2)
///     .hours_ago(3)
///     .counts(r#"{"10": 4}"#)
///     .build()
///     .await?;
/// ```
pub struct ActivityBucketFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    hour: DateTime<Utc>,
    counts: String,
}

impl<'a> ActivityBucketFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - guild_id / user_id: unique counter values
    /// - hour: start of the current UTC hour
    /// - counts: `{}`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let now = Utc::now();
        Self {
            db,
            guild_id: next_id().to_string(),
            user_id: next_id().to_string(),
            hour: now.duration_trunc(TimeDelta::hours(1)).unwrap_or(now),
            counts: "{}".to_string(),
        }
    }

    pub fn subject(mut self, guild_id: u64, user_id: u64) -> Self {
        self.guild_id = guild_id.to_string();
        self.user_id = user_id.to_string();
        self
    }

    pub fn hour(mut self, hour: DateTime<Utc>) -> Self {
        self.hour = hour;
        self
    }

    /// Moves the bucket `hours` back from the current hour.
    pub fn hours_ago(mut self, hours: i64) -> Self {
        let now = Utc::now();
        let current = now.duration_trunc(TimeDelta::hours(1)).unwrap_or(now);
        self.hour = current - TimeDelta::hours(hours);
        self
    }

    /// Sets the raw JSON stored in the `counts` column.
    pub fn counts(mut self, counts: impl Into<String>) -> Self {
        self.counts = counts.into();
        self
    }

    /// Builds and inserts the row.
    ///
    /// # Returns
    /// - `Ok(entity::activity_bucket::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::activity_bucket::Model, DbErr> {
        entity::activity_bucket::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            hour: ActiveValue::Set(self.hour),
            counts: ActiveValue::Set(self.counts),
        }
        .insert(self.db)
        .await
    }
}
