//! Process-wide state shared by the event handler, commands and scheduled jobs.
//!
//! Every field is cheap to clone: the database handle is a pool and the registries and
//! caches wrap their contents in `Arc`. The state is built once in `main` and handed
//! to the command framework, which passes it to the scheduler during setup.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    error::AppError,
    service::{
        correlator::ConfirmationRegistry,
        leaderboard::LeaderboardCache,
        prefix::PrefixCache,
        registry::{GuildAllowList, OptInRegistry},
        tracker::Tracker,
    },
};

#[derive(Clone)]
pub struct BotState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,

    /// Pending waits for game bot replies and command confirmations.
    pub confirmations: ConfirmationRegistry,
    pub opt_in: OptInRegistry,
    pub guilds: GuildAllowList,
    pub tracker: Tracker,

    /// Board views rendered by the leaderboard command, rebuilt hourly.
    pub leaderboards: LeaderboardCache,
    pub prefixes: PrefixCache,
}

impl BotState {
    /// Loads the opt-in set and guild allow-list and wires the tracker to them.
    ///
    /// # Arguments
    /// - `db` - Migrated database connection
    /// - `config` - Loaded configuration
    ///
    /// # Returns
    /// - `Ok(BotState)` - State ready to be shared
    /// - `Err(AppError)` - Registries could not be loaded
    pub async fn load(db: DatabaseConnection, config: Config) -> Result<Self, AppError> {
        let opt_in = OptInRegistry::load(&db).await?;
        let guilds = GuildAllowList::load(&db).await?;
        let confirmations = ConfirmationRegistry::new();

        let tracker = Tracker::new(
            confirmations.clone(),
            opt_in.clone(),
            guilds.clone(),
            config.game_bot_id,
            config.confirmation_timeout,
        );

        tracing::info!(
            "Loaded {} opted-in users for tracking",
            opt_in.len().await
        );

        Ok(Self {
            db,
            prefixes: PrefixCache::new(config.prefix.clone()),
            config: Arc::new(config),
            confirmations,
            opt_in,
            guilds,
            tracker,
            leaderboards: LeaderboardCache::new(),
        })
    }
}
