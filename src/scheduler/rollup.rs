use std::sync::Arc;

use serenity::all::{ChannelId, CreateEmbed, CreateMessage};
use serenity::http::Http;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    bot::{directory::DiscordDirectory, embed},
    error::AppError,
    model::leaderboard::{LeaderboardEntry, RankedEntry},
    model::milestone::Milestone,
    service::leaderboard::{LeaderboardService, MemberDirectory, WeeklySnapshot},
    state::BotState,
};

const HOURLY_REFRESH: &str = "0 0 * * * *";
const WEEKLY_RESET: &str = "0 0 0 * * Mon";
const CONFIRMATION_SWEEP: &str = "*/30 * * * * *";

/// Starts the rollup scheduler.
///
/// Called from framework setup once the gateway is ready. Registers the hourly
/// leaderboard refresh, the Monday 00:00 UTC weekly reset and the 30 second sweep of expired confirmations. One
/// refresh runs immediately so the leaderboard command has data before the first tick.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `discord_http` - Discord HTTP client for member lookups, role edits and posts
pub async fn start_scheduler(state: BotState, discord_http: Arc<Http>) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;
    let directory = DiscordDirectory::new(discord_http.clone());

    let job_state = state.clone();
    let job_directory = directory.clone();
    let refresh = Job::new_async(HOURLY_REFRESH, move |_uuid, _lock| {
        let state = job_state.clone();
        let directory = job_directory.clone();

        Box::pin(async move {
            if let Err(e) = refresh_leaderboards(&state, &directory).await {
                tracing::error!("Error refreshing leaderboards: {}", e);
            }
        })
    })?;

    let job_state = state.clone();
    let job_directory = directory.clone();
    let job_http = discord_http.clone();
    let weekly = Job::new_async(WEEKLY_RESET, move |_uuid, _lock| {
        let state = job_state.clone();
        let directory = job_directory.clone();
        let http = job_http.clone();

        Box::pin(async move {
            if let Err(e) = weekly_reset(&state, &directory, &http).await {
                tracing::error!("Error running weekly reset: {}", e);
            }
        })
    })?;

    let job_state = state.clone();
    let sweep = Job::new_async(CONFIRMATION_SWEEP, move |_uuid, _lock| {
        let state = job_state.clone();

        Box::pin(async move {
            let expired = state.confirmations.expire_stale().await;
            if expired > 0 {
                tracing::debug!("Swept {} expired confirmations", expired);
            }
        })
    })?;

    scheduler.add(refresh).await?;
    scheduler.add(weekly).await?;
    scheduler.add(sweep).await?;
    scheduler.start().await?;

    tracing::info!("Rollup scheduler started");

    refresh_leaderboards(&state, &directory).await
}

async fn refresh_leaderboards(state: &BotState, directory: &DiscordDirectory) -> Result<(), AppError> {
    LeaderboardService::new(&state.db)
        .refresh(&state.leaderboards, directory)
        .await
}

/// Snapshots the week, posts the announcement, then clears the weekly boards.
///
/// The announcement is best effort; a missing channel or failed post does not stop the
/// reset.
async fn weekly_reset(
    state: &BotState,
    directory: &DiscordDirectory,
    http: &Http,
) -> Result<(), AppError> {
    let service = LeaderboardService::new(&state.db);
    let snapshot = service
        .snapshot_week(
            &state.config.milestones,
            directory,
            state.config.home_guild_id,
        )
        .await?;

    match state.config.announce_channel_id {
        Some(channel_id) => {
            let embed = announcement_embed(&snapshot, directory).await;
            if let Err(e) = ChannelId::new(channel_id)
                .send_message(http, CreateMessage::new().embed(embed))
                .await
            {
                tracing::error!("Failed to post weekly announcement to {}: {}", channel_id, e);
            }
        }
        None => tracing::warn!("ANNOUNCE_CHANNEL_ID not set; skipping weekly announcement"),
    }

    service
        .reset_week(
            &state.leaderboards,
            directory,
            &state.config.milestones,
            state.config.home_guild_id,
        )
        .await?;

    Ok(())
}

async fn resolve(entries: &[LeaderboardEntry], directory: &dyn MemberDirectory) -> Vec<RankedEntry> {
    let mut ranked = Vec::with_capacity(entries.len());
    for entry in entries {
        let display_name = directory
            .display_name(entry.subject.guild_id, entry.subject.user_id)
            .await
            .unwrap_or_else(|_| format!("User {}", entry.subject.user_id));
        ranked.push(RankedEntry {
            display_name,
            score: entry.score,
        });
    }
    ranked
}

fn milestone_lines(counts: &[(Milestone, u64)]) -> String {
    if counts.is_empty() {
        return "No milestone roles to report.".to_string();
    }

    counts
        .iter()
        .map(|(milestone, members)| {
            format!(
                "<@&{}> ({}+ hunts): {} member{}",
                milestone.role_id,
                milestone.threshold,
                members,
                if *members == 1 { "" } else { "s" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

async fn announcement_embed(snapshot: &WeeklySnapshot, directory: &dyn MemberDirectory) -> CreateEmbed {
    let hunters = resolve(&snapshot.hunt_top, directory).await;
    let epic = resolve(&snapshot.epic_top, directory).await;

    CreateEmbed::new()
        .title("Weekly Leaderboard Reset")
        .description("The weekly leaderboards have been reset. Here is how last week ended!")
        .field("Top Hunters", embed::board_block(&hunters, hunters.len()), true)
        .field("Top Epic Events", embed::board_block(&epic, epic.len()), true)
        .field("Milestones", milestone_lines(&snapshot.milestone_counts), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the milestone summary lines.
    ///
    /// Expected: one line per milestone with singular and plural member counts
    #[test]
    fn renders_milestone_lines() {
        let counts = vec![
            (
                Milestone {
                    threshold: 500,
                    role_id: 1,
                },
                2,
            ),
            (
                Milestone {
                    threshold: 1000,
                    role_id: 2,
                },
                1,
            ),
        ];

        assert_eq!(
            milestone_lines(&counts),
            "<@&1> (500+ hunts): 2 members\n<@&2> (1000+ hunts): 1 member"
        );
        assert_eq!(milestone_lines(&[]), "No milestone roles to report.");
    }
}
