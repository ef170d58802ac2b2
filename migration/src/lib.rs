pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_tracked_guild_table;
mod m20260105_000002_create_opted_user_table;
mod m20260105_000003_create_activity_bucket_table;
mod m20260105_000004_create_leaderboard_score_table;
mod m20260105_000005_create_item_drop_table;
mod m20260112_000006_create_points_balance_table;
mod m20260112_000007_create_shop_item_table;
mod m20260112_000008_create_inventory_item_table;
mod m20260112_000009_create_guild_prefix_table;
mod m20260119_000010_create_hunt_cadence_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_tracked_guild_table::Migration),
            Box::new(m20260105_000002_create_opted_user_table::Migration),
            Box::new(m20260105_000003_create_activity_bucket_table::Migration),
            Box::new(m20260105_000004_create_leaderboard_score_table::Migration),
            Box::new(m20260105_000005_create_item_drop_table::Migration),
            Box::new(m20260112_000006_create_points_balance_table::Migration),
            Box::new(m20260112_000007_create_shop_item_table::Migration),
            Box::new(m20260112_000008_create_inventory_item_table::Migration),
            Box::new(m20260112_000009_create_guild_prefix_table::Migration),
            Box::new(m20260119_000010_create_hunt_cadence_table::Migration),
        ]
    }
}
