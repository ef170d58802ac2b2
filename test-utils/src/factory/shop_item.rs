//! Catalog item factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a catalog item with a specific name.
pub async fn create_shop_item_named(
    db: &DatabaseConnection,
    name: &str,
    price: i64,
) -> Result<entity::shop_item::Model, DbErr> {
    entity::shop_item::ActiveModel {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(name.to_string()),
        price: ActiveValue::Set(price),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
