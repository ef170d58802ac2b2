//! Turtlebot Test Utils
//!
//! Shared testing utilities for the bot's repository and service tests. Provides a builder
//! for test contexts backed by in-memory SQLite databases with only the tables a test
//! needs, plus factories for seeding tracker and economy rows.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Errors that can occur during test setup
//! - **factory**: Row factories with sensible defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::OptedUser;
//!
//! #[tokio::test]
//! async fn test_opt_in() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(OptedUser)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
