//! Opt-in set factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an opted-in user with a fresh unique ID.
///
/// # Returns
/// - `Ok(entity::opted_user::Model)` - Created row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_opted_user(db: &DatabaseConnection) -> Result<entity::opted_user::Model, DbErr> {
    create_opted_user_with_id(db, next_id()).await
}

/// Creates an opted-in user with a specific Discord ID.
pub async fn create_opted_user_with_id(
    db: &DatabaseConnection,
    user_id: u64,
) -> Result<entity::opted_user::Model, DbErr> {
    entity::opted_user::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
