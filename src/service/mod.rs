//! Service layer for tracking, aggregation, reporting and the points economy.
//!
//! Services sit between the bot's command/event handlers and the repositories. They hold
//! the business rules (classification, milestone and bonus policy, window clamping) and
//! coordinate multiple repository calls. In-memory process-wide state (pending
//! confirmations, opt-in and guild registries, cached leaderboards, prefixes) is owned
//! by the cheaply clonable registry types in this module.

pub mod activity;
pub mod cadence;
pub mod correlator;
pub mod economy;
pub mod item_drop;
pub mod leaderboard;
pub mod opt_in;
pub mod prefix;
pub mod registry;
pub mod report;
pub mod tracker;

#[cfg(test)]
mod test;
