//! Item catalog repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::economy::{CreateShopItemParam, ShopItem};

pub struct ShopItemRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShopItemRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the whole catalog, cheapest first.
    pub async fn get_all(&self) -> Result<Vec<ShopItem>, DbErr> {
        let entities = entity::prelude::ShopItem::find()
            .order_by_asc(entity::shop_item::Column::Price)
            .order_by_asc(entity::shop_item::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ShopItem::from_entity).collect())
    }

    /// Finds an item by its (lowercase) name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<ShopItem>, DbErr> {
        let entity = entity::prelude::ShopItem::find()
            .filter(entity::shop_item::Column::Name.eq(name.to_lowercase()))
            .one(self.db)
            .await?;

        Ok(entity.map(ShopItem::from_entity))
    }

    /// Creates a catalog item. Names are stored lowercase.
    pub async fn create(&self, param: CreateShopItemParam) -> Result<ShopItem, DbErr> {
        let entity = entity::shop_item::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(param.name.to_lowercase()),
            price: ActiveValue::Set(param.price),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(ShopItem::from_entity(entity))
    }

    /// Deletes an item by name.
    ///
    /// # Returns
    /// - `Ok(true)` - Item deleted
    /// - `Ok(false)` - No item with that name
    pub async fn delete_by_name(&self, name: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::ShopItem::delete_many()
            .filter(entity::shop_item::Column::Name.eq(name.to_lowercase()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
