//! Opt-in set repository.
//!
//! Stores the users who consented to activity tracking. The in-memory registry in
//! `service::registry` is loaded from and written through to this table.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::{error::AppError, util::parse::parse_u64_from_string};

pub struct OptInRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OptInRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the IDs of every opted-in user.
    pub async fn get_all_ids(&self) -> Result<Vec<u64>, AppError> {
        let entities = entity::prelude::OptedUser::find().all(self.db).await?;

        entities
            .into_iter()
            .map(|entity| parse_u64_from_string(entity.user_id))
            .collect()
    }

    /// Checks set membership.
    pub async fn contains(&self, user_id: u64) -> Result<bool, AppError> {
        let entity = entity::prelude::OptedUser::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.is_some())
    }

    /// Adds a user to the set.
    ///
    /// # Returns
    /// - `Ok(true)` - User was added
    /// - `Ok(false)` - User was already opted in
    pub async fn add(&self, user_id: u64) -> Result<bool, AppError> {
        if self.contains(user_id).await? {
            return Ok(false);
        }

        entity::opted_user::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Removes a user from the set.
    ///
    /// # Returns
    /// - `Ok(true)` - User was removed
    /// - `Ok(false)` - User was not opted in
    pub async fn remove(&self, user_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::OptedUser::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(entity::prelude::OptedUser::find().count(self.db).await?)
    }
}
