//! Domain models for tracked activity: subjects, confirmed events, hourly counter
//! records and the summaries built from them.

use std::collections::BTreeMap;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

use crate::{
    error::{internal::InternalError, AppError},
    model::action::{ActionClass, TrackedAction},
    util::parse::parse_u64_from_string,
};

pub const DEFAULT_WINDOW_HOURS: i64 = 12;
pub const MIN_WINDOW_HOURS: i64 = 1;
pub const MAX_WINDOW_HOURS: i64 = 48;

/// Whose activity is being counted: a user within one guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subject {
    pub guild_id: u64,
    pub user_id: u64,
}

impl Subject {
    pub fn new(guild_id: u64, user_id: u64) -> Self {
        Self { guild_id, user_id }
    }

    /// Rebuilds a subject from the string-encoded IDs stored in the database.
    pub fn from_strings(guild_id: String, user_id: String) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(guild_id)?,
            user_id: parse_u64_from_string(user_id)?,
        })
    }
}

/// A tracked action corroborated by the game bot.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedEvent {
    pub action: TrackedAction,
    pub subject: Subject,
    pub at: DateTime<Utc>,
    /// Raw text of the corroborating message, scraped for item drops.
    pub confirmation_text: String,
}

/// Truncates a timestamp to the start of its UTC hour.
pub fn hour_bucket(at: DateTime<Utc>) -> DateTime<Utc> {
    at.duration_trunc(TimeDelta::hours(1)).unwrap_or(at)
}

/// Clamps a requested summary window to the supported range.
pub fn clamp_window(hours: i64) -> i64 {
    hours.clamp(MIN_WINDOW_HOURS, MAX_WINDOW_HOURS)
}

/// Action counts for one subject and one hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRecord {
    pub subject: Subject,
    pub hour: DateTime<Utc>,
    /// Action code to occurrence count. Absent codes count as zero.
    pub counts: BTreeMap<u16, i64>,
}

impl CounterRecord {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(CounterRecord)` - Parsed record
    /// - `Err(AppError::InternalErr)` - IDs or the stored JSON are malformed
    pub fn from_entity(entity: entity::activity_bucket::Model) -> Result<Self, AppError> {
        let raw: BTreeMap<String, i64> = serde_json::from_str(&entity.counts).map_err(|e| {
            InternalError::MalformedCounterRecord {
                guild_id: entity.guild_id.clone(),
                user_id: entity.user_id.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut counts = BTreeMap::new();
        for (code, count) in raw {
            let code = code
                .parse::<u16>()
                .map_err(|e| InternalError::MalformedCounterRecord {
                    guild_id: entity.guild_id.clone(),
                    user_id: entity.user_id.clone(),
                    reason: format!("bad action code '{}': {}", code, e),
                })?;
            counts.insert(code, count);
        }

        Ok(Self {
            subject: Subject::from_strings(entity.guild_id, entity.user_id)?,
            hour: entity.hour,
            counts,
        })
    }

    /// Serialises counts into the stored `{"code": count}` form.
    pub fn counts_json(counts: &BTreeMap<u16, i64>) -> Result<String, serde_json::Error> {
        let raw: BTreeMap<String, i64> = counts
            .iter()
            .map(|(code, count)| (code.to_string(), *count))
            .collect();
        serde_json::to_string(&raw)
    }
}

/// Counts for one class, all time and within the recent window, sorted descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSummary {
    pub all_time: Vec<(String, i64)>,
    pub recent: Vec<(String, i64)>,
}

/// Per-class summary of a subject's activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub window_hours: i64,
    /// Only classes with at least one recorded action are present.
    pub classes: BTreeMap<ActionClass, ClassSummary>,
}

impl ActivitySummary {
    pub fn class(&self, class: ActionClass) -> Option<&ClassSummary> {
        self.classes.get(&class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Item drop counts, all time and within the recent window, sorted descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropSummary {
    pub window_hours: i64,
    pub all_time: Vec<(String, i64)>,
    pub recent: Vec<(String, i64)>,
}

/// Sorts a label map into display order: count descending, then label.
pub fn sorted_desc(map: BTreeMap<String, i64>) -> Vec<(String, i64)> {
    let mut entries: Vec<(String, i64)> = map.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}
