use test_utils::{builder::TestBuilder, factory::leaderboard_score::create_score};

use crate::{
    data::leaderboard::LeaderboardRepository,
    error::AppError,
    model::{activity::Subject, leaderboard::Board},
};

mod clear;
mod increment;
mod rank;
mod top;
