//! Domain models for points, the item shop and inventories.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsBalance {
    pub user_id: u64,
    pub points: i64,
}

impl PointsBalance {
    pub fn from_entity(entity: entity::points_balance::Model) -> Result<Self, AppError> {
        Ok(Self {
            user_id: parse_u64_from_string(entity.user_id)?,
            points: entity.points,
        })
    }
}

/// An item that can be bought with points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopItem {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl ShopItem {
    pub fn from_entity(entity: entity::shop_item::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            price: entity.price,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for adding an item to the shop catalog.
#[derive(Debug, Clone)]
pub struct CreateShopItemParam {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub item_name: String,
    pub quantity: i64,
}

impl InventoryEntry {
    pub fn from_entity(entity: entity::inventory_item::Model) -> Self {
        Self {
            item_name: entity.item_name,
            quantity: entity.quantity,
        }
    }
}

/// Result of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub item: ShopItem,
    pub remaining_points: i64,
    pub quantity_owned: i64,
}
