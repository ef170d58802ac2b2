mod activity;
mod cadence;
mod leaderboard;
