//! Opt-in and opt-out of activity tracking.

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        activity::ActivityBucketRepository, item_drop::ItemDropRepository,
        leaderboard::LeaderboardRepository,
    },
    error::AppError,
    model::activity::Subject,
    service::registry::OptInRegistry,
};

/// Rows removed by an opt-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearedData {
    pub buckets: u64,
    pub leaderboard_entries: u64,
    pub item_drops: u64,
}

pub struct OptInService<'a> {
    db: &'a DatabaseConnection,
    registry: &'a OptInRegistry,
}

impl<'a> OptInService<'a> {
    pub fn new(db: &'a DatabaseConnection, registry: &'a OptInRegistry) -> Self {
        Self { db, registry }
    }

    /// Opts a user in.
    ///
    /// # Returns
    /// - `Ok(())` - User is now tracked
    /// - `Err(AppError::BadRequest)` - User had already opted in
    pub async fn opt_in(&self, user_id: u64) -> Result<(), AppError> {
        if !self.registry.add(self.db, user_id).await? {
            return Err(AppError::BadRequest(
                "You have already opted-in to the program.".to_string(),
            ));
        }
        Ok(())
    }

    /// Opts a user out and deletes everything tracked for them in one guild.
    ///
    /// The registry is updated first so no new activity is recorded while the
    /// subject's rows are being removed.
    pub async fn clear_data(&self, subject: Subject) -> Result<ClearedData, AppError> {
        self.registry.remove(self.db, subject.user_id).await?;

        let cleared = ClearedData {
            buckets: ActivityBucketRepository::new(self.db)
                .delete_all(subject)
                .await?,
            leaderboard_entries: LeaderboardRepository::new(self.db)
                .remove_subject(subject)
                .await?,
            item_drops: ItemDropRepository::new(self.db).delete_all(subject).await?,
        };

        tracing::info!(
            "Cleared data for {:?}: {} buckets, {} leaderboard entries, {} item drops",
            subject,
            cleared.buckets,
            cleared.leaderboard_entries,
            cleared.item_drops
        );

        Ok(cleared)
    }
}
