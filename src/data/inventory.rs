//! Inventory quantity repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::economy::InventoryEntry;

pub struct InventoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a user's items with a positive quantity, alphabetically.
    pub async fn get_by_user(&self, user_id: u64) -> Result<Vec<InventoryEntry>, DbErr> {
        let entities = entity::prelude::InventoryItem::find()
            .filter(entity::inventory_item::Column::UserId.eq(user_id.to_string()))
            .filter(entity::inventory_item::Column::Quantity.gt(0))
            .order_by_asc(entity::inventory_item::Column::ItemName)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(InventoryEntry::from_entity).collect())
    }

    /// Adds `quantity` of an item to a user's inventory.
    ///
    /// # Returns
    /// - `Ok(i64)` - Quantity owned after the update
    pub async fn increment(
        &self,
        user_id: u64,
        item_name: &str,
        quantity: i64,
    ) -> Result<i64, DbErr> {
        let existing = entity::prelude::InventoryItem::find()
            .filter(entity::inventory_item::Column::UserId.eq(user_id.to_string()))
            .filter(entity::inventory_item::Column::ItemName.eq(item_name))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let total = existing.quantity + quantity;
                let mut active: entity::inventory_item::ActiveModel = existing.into();
                active.quantity = ActiveValue::Set(total);
                active.update(self.db).await?
            }
            None => {
                entity::inventory_item::ActiveModel {
                    id: ActiveValue::NotSet,
                    user_id: ActiveValue::Set(user_id.to_string()),
                    item_name: ActiveValue::Set(item_name.to_string()),
                    quantity: ActiveValue::Set(quantity),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(entity.quantity)
    }
}
