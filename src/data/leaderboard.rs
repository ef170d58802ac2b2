//! Sorted leaderboard repository.
//!
//! This module provides the `LeaderboardRepository`, a sorted-set style store holding
//! one score per (board, subject). Scores are read highest first; equal scores are
//! ordered by insertion, which is the row ID.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    error::AppError,
    model::{
        activity::Subject,
        leaderboard::{Board, LeaderboardEntry},
    },
};

pub struct LeaderboardRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_entity(
        &self,
        board: Board,
        subject: Subject,
    ) -> Result<Option<entity::leaderboard_score::Model>, AppError> {
        let entity = entity::prelude::LeaderboardScore::find()
            .filter(entity::leaderboard_score::Column::Board.eq(board.key()))
            .filter(entity::leaderboard_score::Column::GuildId.eq(subject.guild_id.to_string()))
            .filter(entity::leaderboard_score::Column::UserId.eq(subject.user_id.to_string()))
            .one(self.db)
            .await?;

        Ok(entity)
    }

    /// Adds `by` to a subject's score, creating the entry at zero first if needed.
    ///
    /// # Returns
    /// - `Ok(i64)` - Score after the increment
    /// - `Err(AppError)` - Database error
    pub async fn increment(
        &self,
        board: Board,
        subject: Subject,
        by: i64,
    ) -> Result<i64, AppError> {
        let now = Utc::now();

        let entity = match self.find_entity(board, subject).await? {
            Some(existing) => {
                let score = existing.score + by;
                let mut active: entity::leaderboard_score::ActiveModel = existing.into();
                active.score = ActiveValue::Set(score);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::leaderboard_score::ActiveModel {
                    id: ActiveValue::NotSet,
                    board: ActiveValue::Set(board.key().to_string()),
                    guild_id: ActiveValue::Set(subject.guild_id.to_string()),
                    user_id: ActiveValue::Set(subject.user_id.to_string()),
                    score: ActiveValue::Set(by),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(entity.score)
    }

    /// Gets a subject's score on a board.
    ///
    /// # Returns
    /// - `Ok(Some(i64))` - Current score
    /// - `Ok(None)` - Subject is not on the board
    pub async fn score(&self, board: Board, subject: Subject) -> Result<Option<i64>, AppError> {
        Ok(self
            .find_entity(board, subject)
            .await?
            .map(|entity| entity.score))
    }

    /// Gets a subject's 1-based position on a board, highest score first.
    ///
    /// # Returns
    /// - `Ok(Some(u64))` - Rank, 1 being the top
    /// - `Ok(None)` - Subject is not on the board
    pub async fn rank(&self, board: Board, subject: Subject) -> Result<Option<u64>, AppError> {
        let Some(entry) = self.find_entity(board, subject).await? else {
            return Ok(None);
        };

        let ahead = entity::prelude::LeaderboardScore::find()
            .filter(entity::leaderboard_score::Column::Board.eq(board.key()))
            .filter(
                Condition::any()
                    .add(entity::leaderboard_score::Column::Score.gt(entry.score))
                    .add(
                        Condition::all()
                            .add(entity::leaderboard_score::Column::Score.eq(entry.score))
                            .add(entity::leaderboard_score::Column::Id.lt(entry.id)),
                    ),
            )
            .count(self.db)
            .await?;

        Ok(Some(ahead + 1))
    }

    /// Gets the top `limit` entries of a board, highest score first.
    pub async fn top(&self, board: Board, limit: u64) -> Result<Vec<LeaderboardEntry>, AppError> {
        let entities = entity::prelude::LeaderboardScore::find()
            .filter(entity::leaderboard_score::Column::Board.eq(board.key()))
            .order_by_desc(entity::leaderboard_score::Column::Score)
            .order_by_asc(entity::leaderboard_score::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(LeaderboardEntry::from_entity)
            .collect()
    }

    /// Removes every entry from a board.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of entries removed
    pub async fn clear(&self, board: Board) -> Result<u64, AppError> {
        let result = entity::prelude::LeaderboardScore::delete_many()
            .filter(entity::leaderboard_score::Column::Board.eq(board.key()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Removes a subject from every board.
    pub async fn remove_subject(&self, subject: Subject) -> Result<u64, AppError> {
        let result = entity::prelude::LeaderboardScore::delete_many()
            .filter(entity::leaderboard_score::Column::GuildId.eq(subject.guild_id.to_string()))
            .filter(entity::leaderboard_score::Column::UserId.eq(subject.user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
