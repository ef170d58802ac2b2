//! SeaORM entity models for the tracker and economy tables.

pub mod prelude;

pub mod activity_bucket;
pub mod guild_prefix;
pub mod hunt_cadence;
pub mod inventory_item;
pub mod item_drop;
pub mod leaderboard_score;
pub mod opted_user;
pub mod points_balance;
pub mod shop_item;
pub mod tracked_guild;
