//! Points balance repository.
//!
//! This module provides the `PointsRepository` for the per-user points document.
//! Balances are created lazily on first award.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, model::economy::PointsBalance};

pub struct PointsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PointsRepository<'a> {
    /// Creates a new PointsRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `PointsRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a user's balance, zero if they never earned points.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(PointsBalance)` - Stored or zero balance
    /// - `Err(AppError)` - Database error
    pub async fn get(&self, user_id: u64) -> Result<PointsBalance, AppError> {
        let entity = entity::prelude::PointsBalance::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        match entity {
            Some(entity) => PointsBalance::from_entity(entity),
            None => Ok(PointsBalance { user_id, points: 0 }),
        }
    }

    /// Adds `amount` (which may be negative) to a user's balance, upserting the row.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `amount` - Points to add
    ///
    /// # Returns
    /// - `Ok(PointsBalance)` - Balance after the update
    /// - `Err(AppError)` - Database error
    pub async fn add(&self, user_id: u64, amount: i64) -> Result<PointsBalance, AppError> {
        let now = Utc::now();
        let existing = entity::prelude::PointsBalance::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let points = existing.points + amount;
                let mut active: entity::points_balance::ActiveModel = existing.into();
                active.points = ActiveValue::Set(points);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::points_balance::ActiveModel {
                    user_id: ActiveValue::Set(user_id.to_string()),
                    points: ActiveValue::Set(amount),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?
            }
        };

        PointsBalance::from_entity(entity)
    }
}
