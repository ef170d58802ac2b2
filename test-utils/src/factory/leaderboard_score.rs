//! Leaderboard entry factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating board entries.
///
/// # Example
///
/// ```rust,ignore
/// let entry = LeaderboardScoreFactory::new(&db, "hunt_weekly")
///     .subject(1, 2)
///     .score(500)
///     .build()
///     .await?;
/// ```
pub struct LeaderboardScoreFactory<'a> {
    db: &'a DatabaseConnection,
    board: String,
    guild_id: String,
    user_id: String,
    score: i64,
}

impl<'a> LeaderboardScoreFactory<'a> {
    /// Creates a new factory for `board`.
    ///
    /// Defaults:
    /// - guild_id / user_id: unique counter values
    /// - score: `1`
    pub fn new(db: &'a DatabaseConnection, board: impl Into<String>) -> Self {
        Self {
            db,
            board: board.into(),
            guild_id: next_id().to_string(),
            user_id: next_id().to_string(),
            score: 1,
        }
    }

    pub fn subject(mut self, guild_id: u64, user_id: u64) -> Self {
        self.guild_id = guild_id.to_string();
        self.user_id = user_id.to_string();
        self
    }

    pub fn score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    pub async fn build(self) -> Result<entity::leaderboard_score::Model, DbErr> {
        entity::leaderboard_score::ActiveModel {
            id: ActiveValue::NotSet,
            board: ActiveValue::Set(self.board),
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            score: ActiveValue::Set(self.score),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an entry on `board` for a specific subject.
///
/// Shorthand for `LeaderboardScoreFactory::new(db, board).subject(..).score(..).build()`.
pub async fn create_score(
    db: &DatabaseConnection,
    board: &str,
    guild_id: u64,
    user_id: u64,
    score: i64,
) -> Result<entity::leaderboard_score::Model, DbErr> {
    LeaderboardScoreFactory::new(db, board)
        .subject(guild_id, user_id)
        .score(score)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_entry_with_custom_score() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(LeaderboardScore)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let entry = create_score(db, "hunt_total", 1, 2, 42).await?;

        assert_eq!(entry.board, "hunt_total");
        assert_eq!(entry.user_id, "2");
        assert_eq!(entry.score, 42);

        Ok(())
    }
}
