//! Factory methods for creating test data.
//!
//! Each table the tests seed directly has its own factory module with a `Factory`
//! struct for customization and a `create_*` shorthand for quick default creation.
//! Defaults use unique IDs from [`helpers::next_id`], so repeated calls never collide.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let opted = factory::opted_user::create_opted_user(&db).await?;
//! let entry = factory::leaderboard_score::LeaderboardScoreFactory::new(&db, "hunt_weekly")
//!     .score(250)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `activity_bucket` - Hourly counter rows with raw JSON counts
//! - `leaderboard_score` - Board entries
//! - `opted_user` - Opt-in set members
//! - `shop_item` - Catalog items

pub mod activity_bucket;
pub mod helpers;
pub mod leaderboard_score;
pub mod opted_user;
pub mod shop_item;
