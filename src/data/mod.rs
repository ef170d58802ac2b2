//! Database repository layer for all tracker and economy tables.
//!
//! Each repository wraps one table and exposes only the primitive operations the
//! services need: find-one, find-all, upsert, increment and delete for documents, and
//! increment/score/rank/range/clear for the sorted leaderboards. Repositories take
//! domain types in and return domain types out; string-encoded IDs and JSON columns
//! never leak past this layer.

pub mod activity;
pub mod cadence;
pub mod inventory;
pub mod item_drop;
pub mod leaderboard;
pub mod opt_in;
pub mod points;
pub mod prefix;
pub mod shop;
pub mod tracked_guild;

#[cfg(test)]
mod test;
