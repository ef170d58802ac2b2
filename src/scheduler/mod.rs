//! Periodic jobs: hourly leaderboard refresh, weekly reset and the confirmation sweep.
//!
//! Jobs run on `tokio-cron-scheduler` in UTC and interleave freely with message
//! handling. A failing run is logged and the next tick tries again.

pub mod rollup;
