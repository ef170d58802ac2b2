use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables with `with_table()` (or one of the grouped helpers), then call
/// `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{ActivityBucket, LeaderboardScore};
///
/// let test = TestBuilder::new()
///     .with_table(ActivityBucket)
///     .with_table(LeaderboardScore)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// syntax. The table is created when `build()` is called.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds every table the activity aggregator writes to.
    ///
    /// This convenience method adds:
    /// - OptedUser
    /// - TrackedGuild
    /// - ActivityBucket
    /// - LeaderboardScore
    /// - ItemDrop
    /// - PointsBalance
    /// - HuntCadence
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_tracker_tables(self) -> Self {
        self.with_table(OptedUser)
            .with_table(TrackedGuild)
            .with_table(ActivityBucket)
            .with_table(LeaderboardScore)
            .with_table(ItemDrop)
            .with_table(PointsBalance)
            .with_table(HuntCadence)
    }

    /// Adds the points, catalog and inventory tables.
    pub fn with_economy_tables(self) -> Self {
        self.with_table(PointsBalance)
            .with_table(ShopItem)
            .with_table(InventoryItem)
    }

    /// Builds the test context and creates the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
