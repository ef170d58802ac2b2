//! Per-guild command prefixes with an in-memory cache.

use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::{data::prefix::GuildPrefixRepository, error::AppError};

const MAX_PREFIX_LEN: usize = 5;

#[derive(Clone)]
pub struct PrefixCache {
    default: String,
    prefixes: Arc<RwLock<HashMap<u64, String>>>,
}

impl PrefixCache {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            prefixes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn default_prefix(&self) -> &str {
        &self.default
    }

    /// Resolves the prefix for a guild, falling back to the default. DMs use the default.
    pub async fn resolve(
        &self,
        db: &DatabaseConnection,
        guild_id: Option<u64>,
    ) -> Result<String, AppError> {
        let Some(guild_id) = guild_id else {
            return Ok(self.default.clone());
        };

        if let Some(prefix) = self.prefixes.read().await.get(&guild_id) {
            return Ok(prefix.clone());
        }

        let prefix = GuildPrefixRepository::new(db)
            .get(guild_id)
            .await?
            .unwrap_or_else(|| self.default.clone());
        self.prefixes.write().await.insert(guild_id, prefix.clone());

        Ok(prefix)
    }

    /// Stores a new prefix for a guild.
    ///
    /// # Returns
    /// - `Ok(())` - Prefix stored and cached
    /// - `Err(AppError::BadRequest)` - Empty, too long or containing whitespace
    pub async fn set(
        &self,
        db: &DatabaseConnection,
        guild_id: u64,
        prefix: &str,
    ) -> Result<(), AppError> {
        if prefix.is_empty()
            || prefix.chars().count() > MAX_PREFIX_LEN
            || prefix.chars().any(char::is_whitespace)
        {
            return Err(AppError::BadRequest(format!(
                "Prefixes must be 1 to {} characters without spaces.",
                MAX_PREFIX_LEN
            )));
        }

        GuildPrefixRepository::new(db).set(guild_id, prefix).await?;
        self.prefixes
            .write()
            .await
            .insert(guild_id, prefix.to_string());

        Ok(())
    }
}
