//! Domain models shared by the data, service and bot layers.
//!
//! Repositories convert SeaORM entities into these types at the data boundary so that
//! services never see raw rows or string-encoded Discord IDs.

pub mod action;
pub mod activity;
pub mod cadence;
pub mod economy;
pub mod leaderboard;
pub mod message;
pub mod milestone;
