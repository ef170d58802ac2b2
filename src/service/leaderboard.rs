//! Cached leaderboard views and the weekly reset.
//!
//! The hourly refresh reads the top entries of every board, resolves each subject to a
//! display name through a [`MemberDirectory`] and replaces the cached view the
//! `leaderboard` command renders. The weekly reset is split in two so that the
//! announcement can be posted between the snapshot and the clear.

use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::{
    data::leaderboard::LeaderboardRepository,
    error::AppError,
    model::{
        leaderboard::{Board, LeaderboardEntry, RankedEntry},
        milestone::Milestone,
    },
};

/// Entries kept per board in the cached view.
pub const CACHED_ENTRIES: u64 = 10;
/// Entries per weekly board shown in the reset announcement.
pub const ANNOUNCED_ENTRIES: u64 = 3;

/// Guild member lookups and role edits needed by the rollups.
#[serenity::async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn display_name(&self, guild_id: u64, user_id: u64) -> Result<String, AppError>;

    /// IDs of every member of `guild_id` holding `role_id`.
    async fn role_holders(&self, guild_id: u64, role_id: u64) -> Result<Vec<u64>, AppError>;

    async fn revoke_role(&self, guild_id: u64, user_id: u64, role_id: u64)
        -> Result<(), AppError>;
}

#[derive(Clone, Default)]
pub struct LeaderboardCache {
    boards: Arc<RwLock<BTreeMap<Board, Vec<RankedEntry>>>>,
}

impl LeaderboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached entries for a board, best first. Empty until the first refresh.
    pub async fn get(&self, board: Board) -> Vec<RankedEntry> {
        self.boards
            .read()
            .await
            .get(&board)
            .cloned()
            .unwrap_or_default()
    }

    async fn replace(&self, board: Board, entries: Vec<RankedEntry>) {
        self.boards.write().await.insert(board, entries);
    }
}

/// State of the weekly boards captured right before they are cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySnapshot {
    pub hunt_top: Vec<LeaderboardEntry>,
    pub epic_top: Vec<LeaderboardEntry>,
    /// Home guild members holding each milestone role, ascending by threshold.
    pub milestone_counts: Vec<(Milestone, u64)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevocationReport {
    pub revoked: usize,
    pub failed: usize,
}

pub struct LeaderboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeaderboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rebuilds the cached view of every board.
    ///
    /// Entries whose member cannot be resolved are skipped.
    pub async fn refresh(
        &self,
        cache: &LeaderboardCache,
        directory: &dyn MemberDirectory,
    ) -> Result<(), AppError> {
        let repo = LeaderboardRepository::new(self.db);

        for board in Board::ALL {
            let top = repo.top(board, CACHED_ENTRIES).await?;

            let mut ranked = Vec::with_capacity(top.len());
            for entry in top {
                match directory
                    .display_name(entry.subject.guild_id, entry.subject.user_id)
                    .await
                {
                    Ok(display_name) => ranked.push(RankedEntry {
                        display_name,
                        score: entry.score,
                    }),
                    Err(e) => tracing::warn!(
                        "Skipping {:?} on {}: failed to resolve member: {}",
                        entry.subject,
                        board.key(),
                        e
                    ),
                }
            }

            cache.replace(board, ranked).await;
        }

        tracing::debug!("Refreshed leaderboard cache");

        Ok(())
    }

    /// Captures the weekly top entries and how many home guild members hold each
    /// milestone role.
    ///
    /// Must run before [`reset_week`](Self::reset_week) revokes the roles. A milestone
    /// whose holders cannot be listed is left out of the counts.
    pub async fn snapshot_week(
        &self,
        milestones: &[Milestone],
        directory: &dyn MemberDirectory,
        home_guild_id: Option<u64>,
    ) -> Result<WeeklySnapshot, AppError> {
        let repo = LeaderboardRepository::new(self.db);

        let mut milestone_counts = Vec::with_capacity(milestones.len());
        if let Some(guild_id) = home_guild_id {
            for milestone in milestones {
                match directory.role_holders(guild_id, milestone.role_id).await {
                    Ok(holders) => milestone_counts.push((*milestone, holders.len() as u64)),
                    Err(e) => tracing::error!(
                        "Failed to count holders of role {}: {}",
                        milestone.role_id,
                        e
                    ),
                }
            }
        }

        Ok(WeeklySnapshot {
            hunt_top: repo.top(Board::HuntWeekly, ANNOUNCED_ENTRIES).await?,
            epic_top: repo.top(Board::EpicWeekly, ANNOUNCED_ENTRIES).await?,
            milestone_counts,
        })
    }

    /// Clears both weekly boards, refreshes the cache and revokes milestone roles.
    ///
    /// Role revocation failures are logged per member and counted, never returned.
    pub async fn reset_week(
        &self,
        cache: &LeaderboardCache,
        directory: &dyn MemberDirectory,
        milestones: &[Milestone],
        home_guild_id: Option<u64>,
    ) -> Result<RevocationReport, AppError> {
        let repo = LeaderboardRepository::new(self.db);
        for board in Board::WEEKLY {
            let removed = repo.clear(board).await?;
            tracing::info!("Cleared {} entries from {}", removed, board.key());
        }

        self.refresh(cache, directory).await?;

        let Some(guild_id) = home_guild_id else {
            if !milestones.is_empty() {
                tracing::warn!("HOME_GUILD_ID not set; milestone roles were not revoked");
            }
            return Ok(RevocationReport::default());
        };

        let mut report = RevocationReport::default();
        for milestone in milestones {
            let holders = match directory.role_holders(guild_id, milestone.role_id).await {
                Ok(holders) => holders,
                Err(e) => {
                    tracing::error!(
                        "Failed to list holders of role {}: {}",
                        milestone.role_id,
                        e
                    );
                    continue;
                }
            };

            for user_id in holders {
                match directory
                    .revoke_role(guild_id, user_id, milestone.role_id)
                    .await
                {
                    Ok(()) => report.revoked += 1,
                    Err(e) => {
                        report.failed += 1;
                        tracing::error!(
                            "Failed to revoke role {} from {}: {}",
                            milestone.role_id,
                            user_id,
                            e
                        );
                    }
                }
            }
        }

        tracing::info!(
            "Weekly reset revoked {} milestone roles ({} failures)",
            report.revoked,
            report.failed
        );

        Ok(report)
    }
}
