//! Activity aggregation for confirmed events.
//!
//! This module provides the `ActivityService` which applies every effect of a confirmed
//! event: the hourly counter, the total and weekly leaderboards, milestone role
//! selection, point awards, item drop counting and the cadence check. Counter and
//! leaderboard writes are required; item drops and cadence are best effort and their
//! failures are only logged.

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        activity::ActivityBucketRepository, item_drop::ItemDropRepository,
        leaderboard::LeaderboardRepository,
    },
    error::AppError,
    model::{
        activity::ConfirmedEvent,
        cadence::CadenceReport,
        leaderboard::Board,
        milestone::{hunt_bonus, qualifying_role, Milestone},
    },
    service::{cadence::CadenceService, economy::PointsService, item_drop::parse_item_drops},
};

/// Everything that happened while recording one confirmed event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityOutcome {
    /// Count for the event's code in its hour bucket after the increment.
    pub bucket_count: i64,
    /// Weekly score on the event's board after the increment.
    pub weekly_score: i64,
    /// Milestone role the subject qualifies for; granting it is up to the caller.
    pub milestone_role: Option<u64>,
    pub points_awarded: Option<i64>,
    pub item_drops: Vec<String>,
    pub cadence: Option<CadenceReport>,
}

pub struct ActivityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityService<'a> {
    /// Creates a new ActivityService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ActivityService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a confirmed event.
    ///
    /// Milestone and point effects read the post-increment weekly score.
    ///
    /// # Arguments
    /// - `event` - Event confirmed by the game bot
    /// - `milestones` - Weekly hunt milestones sorted ascending by threshold
    ///
    /// # Returns
    /// - `Ok(ActivityOutcome)` - Effects applied
    /// - `Err(AppError)` - Counter, leaderboard or points write failed
    pub async fn record(
        &self,
        event: &ConfirmedEvent,
        milestones: &[Milestone],
    ) -> Result<ActivityOutcome, AppError> {
        let subject = event.subject;
        let class = event.action.class();

        let bucket_count = ActivityBucketRepository::new(self.db)
            .increment(subject, event.at, event.action.code())
            .await?;

        let leaderboards = LeaderboardRepository::new(self.db);
        let (total, weekly) = Board::for_class(class);
        leaderboards.increment(total, subject, 1).await?;
        let weekly_score = leaderboards.increment(weekly, subject, 1).await?;

        let mut outcome = ActivityOutcome {
            bucket_count,
            weekly_score,
            ..Default::default()
        };

        let points = if class.is_hunt() {
            outcome.milestone_role = qualifying_role(milestones, weekly_score);
            hunt_bonus(weekly_score - 1, weekly_score)
        } else {
            event.action.epic_points()
        };

        if let Some(points) = points {
            let balance = PointsService::new(self.db)
                .award(subject.user_id, points)
                .await?;
            tracing::debug!(
                "Awarded {} points to user {} (balance {})",
                points,
                subject.user_id,
                balance.points
            );
            outcome.points_awarded = Some(points);
        }

        if class.is_hunt() {
            outcome.item_drops = self.record_item_drops(event).await;
            outcome.cadence = match CadenceService::new(self.db)
                .record_hunt(subject.user_id, event.at)
                .await
            {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!("Failed to record hunt cadence for {}: {}", subject.user_id, e);
                    None
                }
            };
        }

        Ok(outcome)
    }

    async fn record_item_drops(&self, event: &ConfirmedEvent) -> Vec<String> {
        let repo = ItemDropRepository::new(self.db);
        let mut recorded = Vec::new();

        for item in parse_item_drops(&event.confirmation_text) {
            match repo.increment(event.subject, event.at, &item).await {
                Ok(_) => recorded.push(item),
                Err(e) => tracing::warn!("Failed to record item drop '{}': {}", item, e),
            }
        }

        recorded
    }
}
