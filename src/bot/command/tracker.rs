//! Opt-in, data clearing and activity statistics commands.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{CreateEmbed, GuildId};
use serenity::cache::Cache;

use crate::{
    bot::{
        command::{self, Context},
        embed,
    },
    data::{activity::ActivityBucketRepository, leaderboard::LeaderboardRepository},
    error::AppError,
    model::{
        action::{ActionClass, TrackedAction},
        activity::{ActivitySummary, Subject, DEFAULT_WINDOW_HOURS},
        leaderboard::Board,
        message::InboundMessage,
    },
    service::{opt_in::OptInService, registry::GuildAllowList, report::ReportService},
    util::parse::{parse_bucket_hour, parse_user_arg},
};

const CLEAR_DATA_TIMEOUT: Duration = Duration::from_secs(20);
/// Shortest numeric argument treated as a Discord ID rather than an hour count.
const MIN_SNOWFLAKE_DIGITS: usize = 17;

/// Opt in to RPG hunt tracking.
#[poise::command(prefix_command, guild_only)]
pub async fn optin(ctx: Context<'_>) -> Result<(), AppError> {
    command::require_tracked_guild(ctx).await?;

    OptInService::new(&ctx.data().db, &ctx.data().opt_in)
        .opt_in(ctx.author().id.get())
        .await?;

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Opted-in!",
            "You have been opted-in to the RPG hunt tracker.",
        ),
    )
    .await
}

/// Opt out and delete everything tracked about you.
///
/// Asks for a yes/no confirmation first.
#[poise::command(prefix_command, guild_only)]
pub async fn cleardata(ctx: Context<'_>) -> Result<(), AppError> {
    let guild_id = command::require_tracked_guild(ctx).await?;

    ctx.say(
        "Are you **sure** you want to clear your data? This action is **irrevocable** and will \
         delete all of your tracked hunts.\n(Respond yes/no)",
    )
    .await?;

    let author_id = ctx.author().id.get();
    let answer = ctx
        .data()
        .confirmations
        .wait_for(
            ctx.channel_id().get(),
            CLEAR_DATA_TIMEOUT,
            clear_data_answer(author_id),
        )
        .await;

    let confirmed = answer.and_then(|answer| parse_answer(&answer.content)) == Some(true);
    if !confirmed {
        ctx.say("Operation cancelled.").await?;
        return Ok(());
    }

    let cleared = OptInService::new(&ctx.data().db, &ctx.data().opt_in)
        .clear_data(Subject::new(guild_id, author_id))
        .await?;
    tracing::info!("Cleared data for user {}: {:?}", author_id, cleared);

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Data Cleared",
            format!(
                "All data for {} has been removed from the bot.",
                ctx.author().name
            ),
        ),
    )
    .await
}

/// Reads a yes/no answer.
fn parse_answer(content: &str) -> Option<bool> {
    match content.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Matches only a yes/no answer from `author_id`, so their other messages keep flowing
/// to the tracker while the prompt is open.
fn clear_data_answer(author_id: u64) -> impl Fn(&InboundMessage) -> bool + Send + Sync + 'static {
    move |candidate| candidate.author_id == author_id && parse_answer(&candidate.content).is_some()
}

/// Hunt statistics for you or another user.
///
/// Usage: `stats [@user|id] [hours]`
#[poise::command(
    prefix_command,
    guild_only,
    subcommands("epic", "drops", "whitelist", "admin", "set")
)]
pub async fn stats(ctx: Context<'_>, #[rest] args: Option<String>) -> Result<(), AppError> {
    summary(ctx, &split_args(args), StatsView::Hunts).await
}

/// Epic event statistics.
///
/// Usage: `stats epic [@user|id] [hours]`
#[poise::command(prefix_command, guild_only)]
pub async fn epic(ctx: Context<'_>, #[rest] args: Option<String>) -> Result<(), AppError> {
    summary(ctx, &split_args(args), StatsView::Epic).await
}

/// Item drops scraped from hunts.
///
/// Usage: `stats drops [@user|id] [hours]`
#[poise::command(prefix_command, guild_only)]
pub async fn drops(ctx: Context<'_>, #[rest] args: Option<String>) -> Result<(), AppError> {
    summary(ctx, &split_args(args), StatsView::Drops).await
}

fn split_args(args: Option<String>) -> Vec<String> {
    args.map(|args| args.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatsView {
    Hunts,
    Epic,
    Drops,
}

/// Splits `[@user|id] [hours]` arguments.
///
/// Mentions and numbers at least as long as a Discord ID name the user; shorter numbers
/// are the window in hours.
fn parse_target_and_hours(args: &[String], author_id: u64) -> Result<(u64, i64), AppError> {
    let mut user_id = author_id;
    let mut hours = DEFAULT_WINDOW_HOURS;

    for arg in args.iter().take(2) {
        let numeric = arg.chars().all(|c| c.is_ascii_digit());

        if numeric && arg.len() < MIN_SNOWFLAKE_DIGITS {
            hours = arg
                .parse()
                .map_err(|_| AppError::BadRequest(format!("`{}` is not a valid number of hours", arg)))?;
        } else {
            user_id = parse_user_arg(arg).ok_or_else(|| {
                AppError::BadRequest(format!("Could not find user by name or id of `{}`", arg))
            })?;
        }
    }

    Ok((user_id, hours))
}

async fn summary(ctx: Context<'_>, args: &[String], view: StatsView) -> Result<(), AppError> {
    let guild_id = command::require_tracked_guild(ctx).await?;
    let author_id = ctx.author().id.get();
    let (user_id, hours) = parse_target_and_hours(args, author_id)?;
    let state = ctx.data();

    if !state.opt_in.contains(user_id).await {
        return Err(AppError::BadRequest(if user_id == author_id {
            "You must sign up for tracking to display stats. See `optin`.".to_string()
        } else {
            format!(
                "{} has not signed up for hunt tracking.",
                command::display_name(ctx, user_id).await
            )
        }));
    }

    let subject = Subject::new(guild_id, user_id);
    let report = ReportService::new(&state.db);
    let name = command::display_name(ctx, user_id).await;
    let now = Utc::now();

    let embed = match view {
        StatsView::Hunts => {
            let leaderboards = LeaderboardRepository::new(&state.db);
            let ranks = (
                leaderboards.rank(Board::HuntTotal, subject).await?,
                leaderboards.rank(Board::HuntWeekly, subject).await?,
            );
            hunt_embed(
                embed::default_embed(ctx.author()),
                &name,
                &report.summarize(subject, hours, now).await?,
                ranks,
            )
        }
        StatsView::Epic => epic_embed(
            embed::default_embed(ctx.author()),
            &name,
            &report.summarize(subject, hours, now).await?,
        ),
        StatsView::Drops => {
            let drops = report.summarize_drops(subject, hours, now).await?;
            embed::default_embed(ctx.author())
                .title("Item Drops")
                .description(format!("Item drops scraped from {}'s hunts.", name))
                .field(
                    "Item Drops (all time)",
                    embed::count_lines(&drops.all_time, "No drops found."),
                    true,
                )
                .field(
                    format!("Item Drops (last {}h)", drops.window_hours),
                    embed::count_lines(&drops.recent, "No drops found."),
                    true,
                )
        }
    };

    command::reply(ctx, embed).await
}

fn rank_label(rank: Option<u64>) -> String {
    rank.map(|rank| format!("#{}", rank))
        .unwrap_or_else(|| "unranked".to_string())
}

fn hunt_embed(
    base: CreateEmbed,
    name: &str,
    summary: &ActivitySummary,
    (total_rank, weekly_rank): (Option<u64>, Option<u64>),
) -> CreateEmbed {
    let description = if summary.is_empty() {
        format!("I have not seen {} hunt yet. Try hunting and checking again!", name)
    } else {
        format!("Here are the hunt stats for {}.", name)
    };
    let mut embed = base.title("Hunt Stats").description(description).field(
        "Leaderboard Rank",
        format!(
            "Total {} | Weekly {}",
            rank_label(total_rank),
            rank_label(weekly_rank)
        ),
        false,
    );

    let mut shown = 0;
    for class in [ActionClass::Joint, ActionClass::Individual] {
        let Some(counts) = summary.class(class) else {
            continue;
        };
        if shown > 0 {
            embed = embed::spacer(embed);
        }
        embed = embed
            .field(
                format!("Total Hunts ({}, all time)", class.label()),
                embed::count_lines(&counts.all_time, "No hunts found."),
                true,
            )
            .field(
                format!("Total Hunts ({}, last {}h)", class.label(), summary.window_hours),
                embed::count_lines(&counts.recent, "No hunts found."),
                true,
            );
        shown += 1;
    }

    embed
}

fn epic_embed(base: CreateEmbed, name: &str, summary: &ActivitySummary) -> CreateEmbed {
    let empty = Vec::new();
    let (all_time, recent) = summary
        .class(ActionClass::Epic)
        .map(|counts| (&counts.all_time, &counts.recent))
        .unwrap_or((&empty, &empty));

    base.title("Epic Event Stats")
        .description(format!(
            "Epic event stats for {}. If there is nothing here, I have not seen them start an epic event.",
            name
        ))
        .field(
            "Epic Events (all time)",
            embed::count_lines(all_time, "No events found."),
            true,
        )
        .field(
            format!("Epic Events (last {}h)", summary.window_hours),
            embed::count_lines(recent, "No events found."),
            true,
        )
}

/// Enable tracking in a guild the bot is in.
#[poise::command(prefix_command, owners_only)]
pub async fn whitelist(ctx: Context<'_>, guild_id: u64) -> Result<(), AppError> {
    let state = ctx.data();
    let added = whitelist_guild(ctx.cache(), &state.guilds, &state.db, guild_id).await?;

    let description = if added {
        format!("Guild `{}` is now tracked.", guild_id)
    } else {
        format!("Guild `{}` was already tracked.", guild_id)
    };
    command::reply(
        ctx,
        embed::success_embed(ctx.author(), "Whitelist Updated", description),
    )
    .await
}

/// Adds a guild to the allow-list if the bot is a member of it.
///
/// # Returns
/// - `Ok(true)` - Guild was added
/// - `Ok(false)` - Guild was already tracked
/// - `Err(AppError::NotFound)` - The bot is not in that guild
async fn whitelist_guild(
    cache: &Cache,
    guilds: &GuildAllowList,
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<bool, AppError> {
    if guild_id == 0 || cache.guild(GuildId::new(guild_id)).is_none() {
        return Err(AppError::NotFound(format!(
            "I am not in a guild with ID `{}`.",
            guild_id
        )));
    }

    guilds.add(db, guild_id).await
}

/// Tracker totals for moderators.
#[poise::command(prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn admin(ctx: Context<'_>) -> Result<(), AppError> {
    let state = ctx.data();
    let opted = state.opt_in.len().await;

    command::reply(
        ctx,
        embed::default_embed(ctx.author())
            .title("Tracker Admin Stats")
            .field("Opted-in users", opted.to_string(), true)
            .field(
                "Pending confirmations",
                state.confirmations.outstanding().await.to_string(),
                true,
            ),
    )
    .await
}

/// Arguments of `stats set`, validated before anything is written.
#[derive(Debug, Clone, PartialEq)]
struct CounterOverwrite {
    user_id: u64,
    hour: chrono::DateTime<Utc>,
    action: TrackedAction,
    count: i64,
}

fn parse_overwrite(args: &[String]) -> Result<CounterOverwrite, AppError> {
    let [user, hour, code, count] = args else {
        return Err(AppError::BadRequest(
            "Usage: `stats set <@user> <YYYY-MM-DD-HH> <code> <count>`".to_string(),
        ));
    };

    let user_id = parse_user_arg(user).ok_or_else(|| {
        AppError::BadRequest(format!("Could not find user by name or id of `{}`", user))
    })?;
    let hour = parse_bucket_hour(hour)?;
    let action = code
        .parse::<u16>()
        .ok()
        .and_then(TrackedAction::from_code)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown event code `{}`", code)))?;
    let count = count
        .parse::<i64>()
        .ok()
        .filter(|count| *count >= 0)
        .ok_or_else(|| AppError::BadRequest(format!("`{}` is not a valid count", count)))?;

    Ok(CounterOverwrite {
        user_id,
        hour,
        action,
        count,
    })
}

/// Overwrite one hourly counter.
///
/// Usage: `stats set <@user> <YYYY-MM-DD-HH> <code> <count>`
#[poise::command(prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn set(
    ctx: Context<'_>,
    user: String,
    hour: String,
    code: String,
    count: String,
) -> Result<(), AppError> {
    let guild_id = command::guild_id(ctx)?;
    let overwrite = parse_overwrite(&[user, hour, code, count])?;

    let subject = Subject::new(guild_id, overwrite.user_id);
    let repo = ActivityBucketRepository::new(&ctx.data().db);
    let mut counts = repo
        .get(subject, overwrite.hour)
        .await?
        .map(|record| record.counts)
        .unwrap_or_else(BTreeMap::new);
    counts.insert(overwrite.action.code(), overwrite.count);

    repo.set(subject, overwrite.hour, counts).await?;
    tracing::info!(
        "User {} set {} to {} for {:?} at {}",
        ctx.author().id,
        overwrite.action.label(),
        overwrite.count,
        subject,
        overwrite.hour
    );

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Counter Updated",
            format!(
                "Set **{}** to {} for <@{}> at {} UTC.",
                overwrite.action.label(),
                overwrite.count,
                overwrite.user_id,
                overwrite.hour.format("%Y-%m-%d %H:00")
            ),
        ),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::correlator::ConfirmationRegistry;
    use test_utils::builder::TestBuilder;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn message(author_id: u64, content: &str) -> InboundMessage {
        InboundMessage {
            id: 1,
            guild_id: Some(7),
            channel_id: 70,
            author_id,
            author_name: "someone".to_string(),
            author_is_bot: false,
            content: content.to_string(),
            embed_count: 0,
            author_role_ids: Vec::new(),
        }
    }

    /// Tests defaults and each argument form.
    ///
    /// Expected: author and default window when empty; mentions, IDs and hours recognised
    #[test]
    fn parses_target_and_hours() {
        assert_eq!(
            parse_target_and_hours(&[], 1).unwrap(),
            (1, DEFAULT_WINDOW_HOURS)
        );
        assert_eq!(parse_target_and_hours(&args(&["24"]), 1).unwrap(), (1, 24));
        assert_eq!(
            parse_target_and_hours(&args(&["<@!175386962364989440>", "6"]), 1).unwrap(),
            (175386962364989440, 6)
        );
        assert_eq!(
            parse_target_and_hours(&args(&["175386962364989440"]), 1).unwrap(),
            (175386962364989440, DEFAULT_WINDOW_HOURS)
        );
    }

    /// Tests rejection of unrecognised user arguments.
    ///
    /// Expected: BadRequest
    #[test]
    fn rejects_unknown_user() {
        let result = parse_target_and_hours(&args(&["somebody"]), 1);

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    /// Tests splitting of rest arguments.
    ///
    /// Expected: whitespace-separated words, nothing for no arguments
    #[test]
    fn splits_rest_arguments() {
        assert_eq!(
            split_args(Some(" <@5>   24 ".to_string())),
            args(&["<@5>", "24"])
        );
        assert!(split_args(None).is_empty());
    }

    /// Tests a valid counter overwrite.
    ///
    /// Expected: all four parts parsed
    #[test]
    fn parses_overwrite() {
        let overwrite = parse_overwrite(&args(&["<@5>", "2026-01-05-17", "10", "3"])).unwrap();

        assert_eq!(overwrite.user_id, 5);
        assert_eq!(overwrite.action, TrackedAction::Hunt);
        assert_eq!(overwrite.count, 3);
    }

    /// Tests that malformed overwrites are rejected before any write.
    ///
    /// Expected: BadRequest for bad hour, unknown code, negative count and missing args
    #[test]
    fn rejects_bad_overwrites() {
        for bad in [
            args(&["<@5>", "2026-01-05", "10", "3"]),
            args(&["<@5>", "2026-01-05-17", "42", "3"]),
            args(&["<@5>", "2026-01-05-17", "10", "-1"]),
            args(&["<@5>", "2026-01-05-17"]),
        ] {
            assert!(matches!(parse_overwrite(&bad), Err(AppError::BadRequest(_))));
        }
    }

    /// Tests rank labels in hunt stats.
    ///
    /// Expected: a ranked subject shows its position, an absent one shows unranked
    #[test]
    fn labels_ranks() {
        assert_eq!(rank_label(Some(3)), "#3");
        assert_eq!(rank_label(None), "unranked");
    }

    /// Tests confirmation answers.
    ///
    /// Expected: yes/y and no/n in any case recognised, anything else is not an answer
    #[test]
    fn recognises_answers() {
        assert_eq!(parse_answer("YES"), Some(true));
        assert_eq!(parse_answer(" y "), Some(true));
        assert_eq!(parse_answer("no"), Some(false));
        assert_eq!(parse_answer("N"), Some(false));
        assert_eq!(parse_answer("yes please"), None);
        assert_eq!(parse_answer("rpg hunt"), None);
    }

    /// Tests the clear-data prompt against the user's other messages.
    ///
    /// Verifies that a game command sent while the prompt is open is not taken as the
    /// answer, and that the following yes is.
    ///
    /// Expected: "rpg hunt" not consumed, "yes" delivered to the waiter
    #[tokio::test]
    async fn clear_data_prompt_ignores_game_commands() {
        let registry = ConfirmationRegistry::new();
        let handle = registry
            .register(70, Duration::from_secs(2), clear_data_answer(42))
            .await;

        assert!(!registry.offer(&message(42, "rpg hunt")).await);
        assert!(!registry.offer(&message(43, "yes")).await);
        assert!(registry.offer(&message(42, "yes")).await);

        let answer = registry.wait(handle).await.unwrap();
        assert_eq!(parse_answer(&answer.content), Some(true));
    }

    /// Tests whitelisting a guild the bot is not in.
    ///
    /// Verifies that an unknown guild ID is refused before anything is stored.
    ///
    /// Expected: NotFound, allow-list unchanged
    #[tokio::test]
    async fn whitelist_refuses_unknown_guild() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::TrackedGuild)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let cache = Cache::new();
        let guilds = GuildAllowList::load(db).await?;

        let result = whitelist_guild(&cache, &guilds, db, 123456789012345678).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = whitelist_guild(&cache, &guilds, db, 0).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        assert!(!guilds.contains(123456789012345678).await);
        assert!(!GuildAllowList::load(db)
            .await?
            .contains(123456789012345678)
            .await);

        Ok(())
    }
}
