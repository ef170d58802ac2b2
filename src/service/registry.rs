//! Process-wide ID registries loaded at startup and written through on change.
//!
//! `OptInRegistry` owns the set of users who consented to tracking and `GuildAllowList`
//! the guilds whose messages are tracked at all. Both are read on every inbound message,
//! so membership is answered from memory. Mutations go to the database first and only
//! then to the in-memory set, so a failed write leaves both unchanged.

use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::{
    data::{opt_in::OptInRepository, tracked_guild::TrackedGuildRepository},
    error::AppError,
};

#[derive(Clone, Default)]
pub struct OptInRegistry {
    users: Arc<RwLock<HashSet<u64>>>,
}

impl OptInRegistry {
    /// Loads the opt-in set from the database.
    pub async fn load(db: &DatabaseConnection) -> Result<Self, AppError> {
        let ids = OptInRepository::new(db).get_all_ids().await?;
        tracing::info!("Loaded {} opted-in users", ids.len());

        Ok(Self {
            users: Arc::new(RwLock::new(ids.into_iter().collect())),
        })
    }

    pub async fn contains(&self, user_id: u64) -> bool {
        self.users.read().await.contains(&user_id)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Adds a user.
    ///
    /// # Returns
    /// - `Ok(true)` - User was added
    /// - `Ok(false)` - User was already opted in
    pub async fn add(&self, db: &DatabaseConnection, user_id: u64) -> Result<bool, AppError> {
        let added = OptInRepository::new(db).add(user_id).await?;
        self.users.write().await.insert(user_id);
        Ok(added)
    }

    /// Removes a user.
    ///
    /// # Returns
    /// - `Ok(true)` - User was removed
    /// - `Ok(false)` - User was not opted in
    pub async fn remove(&self, db: &DatabaseConnection, user_id: u64) -> Result<bool, AppError> {
        let removed = OptInRepository::new(db).remove(user_id).await?;
        self.users.write().await.remove(&user_id);
        Ok(removed)
    }
}

#[derive(Clone, Default)]
pub struct GuildAllowList {
    guilds: Arc<RwLock<HashSet<u64>>>,
}

impl GuildAllowList {
    pub async fn load(db: &DatabaseConnection) -> Result<Self, AppError> {
        let ids = TrackedGuildRepository::new(db).get_all_ids().await?;
        tracing::info!("Loaded {} tracked guilds", ids.len());

        Ok(Self {
            guilds: Arc::new(RwLock::new(ids.into_iter().collect())),
        })
    }

    pub async fn contains(&self, guild_id: u64) -> bool {
        self.guilds.read().await.contains(&guild_id)
    }

    /// Adds a guild to the allow-list.
    ///
    /// # Returns
    /// - `Ok(true)` - Guild was added
    /// - `Ok(false)` - Guild was already tracked
    pub async fn add(&self, db: &DatabaseConnection, guild_id: u64) -> Result<bool, AppError> {
        let added = TrackedGuildRepository::new(db).add(guild_id).await?;
        self.guilds.write().await.insert(guild_id);
        Ok(added)
    }
}
