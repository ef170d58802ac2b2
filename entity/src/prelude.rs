pub use super::activity_bucket::Entity as ActivityBucket;
pub use super::guild_prefix::Entity as GuildPrefix;
pub use super::hunt_cadence::Entity as HuntCadence;
pub use super::inventory_item::Entity as InventoryItem;
pub use super::item_drop::Entity as ItemDrop;
pub use super::leaderboard_score::Entity as LeaderboardScore;
pub use super::opted_user::Entity as OptedUser;
pub use super::points_balance::Entity as PointsBalance;
pub use super::shop_item::Entity as ShopItem;
pub use super::tracked_guild::Entity as TrackedGuild;
