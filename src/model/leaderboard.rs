//! Domain models for the sorted hunt and epic leaderboards.

use crate::{
    error::AppError,
    model::{action::ActionClass, activity::Subject},
};

/// One of the four score boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Board {
    HuntTotal,
    HuntWeekly,
    EpicTotal,
    EpicWeekly,
}

impl Board {
    /// Display order used by the leaderboard command and hourly refresh.
    pub const ALL: [Board; 4] = [
        Board::HuntTotal,
        Board::HuntWeekly,
        Board::EpicTotal,
        Board::EpicWeekly,
    ];

    /// Boards cleared by the weekly reset.
    pub const WEEKLY: [Board; 2] = [Board::HuntWeekly, Board::EpicWeekly];

    /// Key stored in the `board` column.
    pub fn key(self) -> &'static str {
        match self {
            Self::HuntTotal => "hunt_total",
            Self::HuntWeekly => "hunt_weekly",
            Self::EpicTotal => "epic_total",
            Self::EpicWeekly => "epic_weekly",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::HuntTotal => "Hunt Total",
            Self::HuntWeekly => "Hunt Weekly",
            Self::EpicTotal => "Epic Total",
            Self::EpicWeekly => "Epic Weekly",
        }
    }

    /// The total and weekly boards a confirmed action of this class increments.
    pub fn for_class(class: ActionClass) -> (Board, Board) {
        if class.is_hunt() {
            (Board::HuntTotal, Board::HuntWeekly)
        } else {
            (Board::EpicTotal, Board::EpicWeekly)
        }
    }
}

/// A subject's score on one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub subject: Subject,
    pub score: i64,
}

impl LeaderboardEntry {
    pub fn from_entity(entity: entity::leaderboard_score::Model) -> Result<Self, AppError> {
        Ok(Self {
            subject: Subject::from_strings(entity.guild_id, entity.user_id)?,
            score: entity.score,
        })
    }
}

/// Leaderboard line with the subject already resolved to a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub display_name: String,
    pub score: i64,
}
