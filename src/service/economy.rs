//! Points, shop catalog and inventory operations.

use sea_orm::DatabaseConnection;

use crate::{
    data::{inventory::InventoryRepository, points::PointsRepository, shop::ShopItemRepository},
    error::AppError,
    model::economy::{CreateShopItemParam, InventoryEntry, PointsBalance, Purchase, ShopItem},
};

/// Longest accepted catalog item name.
const MAX_ITEM_NAME_LEN: usize = 64;

pub struct PointsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PointsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn balance(&self, user_id: u64) -> Result<PointsBalance, AppError> {
        PointsRepository::new(self.db).get(user_id).await
    }

    /// Adds points to a user's balance. Negative amounts remove points.
    ///
    /// # Returns
    /// - `Ok(PointsBalance)` - Balance after the change
    /// - `Err(AppError::BadRequest)` - The change would leave a negative balance
    pub async fn award(&self, user_id: u64, amount: i64) -> Result<PointsBalance, AppError> {
        let repo = PointsRepository::new(self.db);

        if amount < 0 {
            let current = repo.get(user_id).await?;
            if current.points + amount < 0 {
                return Err(AppError::BadRequest(format!(
                    "That would leave a negative balance ({} points available).",
                    current.points
                )));
            }
        }

        repo.add(user_id, amount).await
    }
}

pub struct ShopService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShopService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn catalog(&self) -> Result<Vec<ShopItem>, AppError> {
        Ok(ShopItemRepository::new(self.db).get_all().await?)
    }

    /// Adds an item to the catalog.
    ///
    /// # Returns
    /// - `Ok(ShopItem)` - Created item
    /// - `Err(AppError::BadRequest)` - Empty or overlong name, non-positive price, or duplicate
    pub async fn add_item(&self, param: CreateShopItemParam) -> Result<ShopItem, AppError> {
        let name = param.name.trim().to_string();
        if name.is_empty() || name.chars().count() > MAX_ITEM_NAME_LEN {
            return Err(AppError::BadRequest(format!(
                "Item names must be between 1 and {} characters.",
                MAX_ITEM_NAME_LEN
            )));
        }
        if param.price <= 0 {
            return Err(AppError::BadRequest(
                "Item price must be a positive number of points.".to_string(),
            ));
        }

        let repo = ShopItemRepository::new(self.db);
        if repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "An item named `{}` already exists.",
                name
            )));
        }

        Ok(repo
            .create(CreateShopItemParam {
                name,
                price: param.price,
            })
            .await?)
    }

    pub async fn remove_item(&self, name: &str) -> Result<(), AppError> {
        if !ShopItemRepository::new(self.db)
            .delete_by_name(name.trim())
            .await?
        {
            return Err(AppError::NotFound(format!("No item named `{}`.", name.trim())));
        }
        Ok(())
    }

    /// Buys one unit of an item.
    ///
    /// # Returns
    /// - `Ok(Purchase)` - Points deducted and inventory incremented
    /// - `Err(AppError::NotFound)` - No such item
    /// - `Err(AppError::BadRequest)` - Not enough points
    pub async fn buy(&self, user_id: u64, name: &str) -> Result<Purchase, AppError> {
        let item = ShopItemRepository::new(self.db)
            .find_by_name(name.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No item named `{}`.", name.trim())))?;

        let points = PointsRepository::new(self.db);
        let balance = points.get(user_id).await?;
        if balance.points < item.price {
            return Err(AppError::BadRequest(format!(
                "`{}` costs {} points but you only have {}.",
                item.name, item.price, balance.points
            )));
        }

        let remaining = points.add(user_id, -item.price).await?;
        let quantity_owned = InventoryRepository::new(self.db)
            .increment(user_id, &item.name, 1)
            .await?;

        Ok(Purchase {
            item,
            remaining_points: remaining.points,
            quantity_owned,
        })
    }

    pub async fn inventory(&self, user_id: u64) -> Result<Vec<InventoryEntry>, AppError> {
        Ok(InventoryRepository::new(self.db).get_by_user(user_id).await?)
    }
}
