//! Hunt timing history used to spot automated play.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Relative change between consecutive deltas that counts as "suspiciously equal".
pub const CADENCE_TOLERANCE: f64 = 0.02;
/// Number of recent deltas inspected by each check.
pub const CADENCE_SAMPLE: usize = 10;
/// A check runs every this many hunts.
pub const CADENCE_CHECK_EVERY: i64 = 10;
/// More than this many near-equal deltas in a sample flags the user.
pub const CADENCE_FLAG_ABOVE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct HuntCadence {
    pub user_id: u64,
    /// Seconds between consecutive confirmed hunts, oldest first.
    pub deltas: Vec<f64>,
    pub last_hunt_at: DateTime<Utc>,
    pub hunt_count: i64,
}

impl HuntCadence {
    pub fn from_entity(entity: entity::hunt_cadence::Model) -> Result<Self, AppError> {
        Ok(Self {
            user_id: parse_u64_from_string(entity.user_id)?,
            deltas: serde_json::from_str(&entity.deltas)?,
            last_hunt_at: entity.last_hunt_at,
            hunt_count: entity.hunt_count,
        })
    }
}

/// Outcome of inspecting the most recent deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct CadenceReport {
    pub user_id: u64,
    /// Relative change between each consecutive pair, rounded to 3 places.
    pub percent_deltas: Vec<f64>,
    pub within_tolerance: usize,
}

impl CadenceReport {
    pub fn is_suspicious(&self) -> bool {
        self.within_tolerance > CADENCE_FLAG_ABOVE
    }
}
