use std::time::Duration;

use crate::{
    error::{config::ConfigError, AppError},
    model::milestone::Milestone,
};

const DEFAULT_PREFIX: &str = "=";
const DEFAULT_ENVIRONMENT: &str = "testing";
const DEFAULT_DEV_ID: u64 = 175386962364989440;
/// The RPG game bot whose replies corroborate tracked actions.
const DEFAULT_GAME_BOT_ID: u64 = 555955826880413696;
const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 3;

pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,

    pub prefix: String,
    pub environment: String,
    pub dev_id: u64,
    pub game_bot_id: u64,

    pub home_guild_id: Option<u64>,
    pub announce_channel_id: Option<u64>,
    /// Sorted ascending by threshold.
    pub milestones: Vec<Milestone>,

    pub confirmation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            prefix: std::env::var("DISCORD_BOT_PREFIX")
                .unwrap_or_else(|_| DEFAULT_PREFIX.to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
            dev_id: optional_id("DEV_ID")?.unwrap_or(DEFAULT_DEV_ID),
            game_bot_id: optional_id("GAME_BOT_ID")?.unwrap_or(DEFAULT_GAME_BOT_ID),
            home_guild_id: optional_id("HOME_GUILD_ID")?,
            announce_channel_id: optional_id("ANNOUNCE_CHANNEL_ID")?,
            milestones: match std::env::var("MILESTONE_ROLES") {
                Ok(value) => parse_milestones(&value)?,
                Err(_) => Vec::new(),
            },
            confirmation_timeout: Duration::from_secs(
                optional_id("CONFIRMATION_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
            ),
        })
    }

    /// Whether verbose logging should be enabled.
    pub fn is_testing(&self) -> bool {
        self.environment == "testing"
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_id(name: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Parses `threshold:role_id` pairs separated by commas, e.g. `500:123,1000:456`.
///
/// The result is sorted ascending by threshold.
pub fn parse_milestones(value: &str) -> Result<Vec<Milestone>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: "MILESTONE_ROLES".to_string(),
        reason,
    };

    let mut milestones = Vec::new();
    for pair in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (threshold, role_id) = pair
            .split_once(':')
            .ok_or_else(|| invalid(format!("expected threshold:role_id, got '{}'", pair)))?;

        milestones.push(Milestone {
            threshold: threshold
                .trim()
                .parse()
                .map_err(|e| invalid(format!("bad threshold '{}': {}", threshold, e)))?,
            role_id: role_id
                .trim()
                .parse()
                .map_err(|e| invalid(format!("bad role id '{}': {}", role_id, e)))?,
        });
    }

    milestones.sort_by_key(|m| m.threshold);
    Ok(milestones)
}
