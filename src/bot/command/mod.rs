//! Prefix commands.
//!
//! Commands are poise prefix commands. The framework strips the guild's prefix (or a
//! mention of the bot), resolves names and aliases, parses arguments and enforces
//! `required_permissions`. Every command returns `Result<(), AppError>`; [`on_error`] is
//! the single place where a failure is turned into an error embed, and only faults that
//! are not user mistakes are logged.
//!
//! "Moderator" commands require Manage Server (Administrator implies it). The owner
//! configured as `DEV_ID` skips every permission check.

pub mod economy;
pub mod info;
pub mod leaderboard;
pub mod moderation;
pub mod tracker;

use std::collections::HashSet;

use poise::{CreateReply, FrameworkError, PartialContext, PrefixFrameworkOptions};
use serenity::all::{CreateEmbed, UserId};

use crate::{
    bot::{embed, handler},
    error::{AppError, UserFacingError},
    state::BotState,
};

pub type Context<'a> = poise::Context<'a, BotState, AppError>;
pub type Command = poise::Command<BotState, AppError>;

/// Every command, in help order.
pub fn commands() -> Vec<Command> {
    vec![
        tracker::optin(),
        tracker::cleardata(),
        tracker::stats(),
        leaderboard::leaderboard(),
        economy::points(),
        economy::shop(),
        economy::buy(),
        economy::inventory(),
        moderation::kick(),
        moderation::ban(),
        moderation::unban(),
        info::help(),
        info::info(),
        info::prefix(),
    ]
}

pub fn framework_options(state: &BotState) -> poise::FrameworkOptions<BotState, AppError> {
    poise::FrameworkOptions {
        commands: commands(),
        prefix_options: PrefixFrameworkOptions {
            dynamic_prefix: Some(|ctx| Box::pin(dynamic_prefix(ctx))),
            mention_as_prefix: true,
            case_insensitive_commands: true,
            ..Default::default()
        },
        owners: HashSet::from([UserId::new(state.config.dev_id)]),
        initialize_owners: false,
        skip_checks_for_owners: true,
        pre_command: |ctx| {
            Box::pin(async move {
                tracing::debug!(
                    "User {} invoked '{}'",
                    ctx.author().id,
                    ctx.command().qualified_name
                );
            })
        },
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, state| {
            Box::pin(handler::event_handler(ctx, event, framework, state))
        },
        ..Default::default()
    }
}

/// The guild's stored prefix, or the configured default.
async fn dynamic_prefix(
    ctx: PartialContext<'_, BotState, AppError>,
) -> Result<Option<String>, AppError> {
    let prefix = ctx
        .data
        .prefixes
        .resolve(&ctx.data.db, ctx.guild_id.map(|id| id.get()))
        .await?;

    Ok(Some(prefix))
}

async fn on_error(error: FrameworkError<'_, BotState, AppError>) {
    match error {
        FrameworkError::Command { error, ctx, .. } => {
            if !error.is_user_error() {
                tracing::error!(
                    "Command '{}' failed: {:?}",
                    ctx.command().qualified_name,
                    error
                );
            }
            report(ctx, &error.user_facing()).await;
        }
        FrameworkError::ArgumentParse { input, ctx, .. } => {
            let problem = match input {
                Some(input) => format!("Could not understand `{}`.", input),
                None => "Missing or invalid arguments.".to_string(),
            };
            let usage = ctx
                .command()
                .help_text
                .as_deref()
                .unwrap_or("See `help` for usage.");
            report(
                ctx,
                &UserFacingError {
                    title: "Invalid Argument",
                    description: format!("{}\n{}", problem, usage),
                },
            )
            .await;
        }
        FrameworkError::MissingUserPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            let description = match missing_permissions {
                Some(permissions) => {
                    format!("You need the {} permission to use this command.", permissions)
                }
                None => "I could not check your permissions here.".to_string(),
            };
            report(
                ctx,
                &UserFacingError {
                    title: "Forbidden",
                    description,
                },
            )
            .await;
        }
        FrameworkError::MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            report(
                ctx,
                &UserFacingError {
                    title: "Forbidden",
                    description: format!(
                        "I need the {} permission to do that.",
                        missing_permissions
                    ),
                },
            )
            .await;
        }
        FrameworkError::NotAnOwner { ctx, .. } => {
            report(
                ctx,
                &UserFacingError {
                    title: "Forbidden",
                    description: "Only the bot owner can use this command.".to_string(),
                },
            )
            .await;
        }
        FrameworkError::GuildOnly { ctx, .. } => {
            report(
                ctx,
                &UserFacingError {
                    title: "Invalid Argument",
                    description: "This command can only be used in a server.".to_string(),
                },
            )
            .await;
        }
        FrameworkError::EventHandler { error, event, .. } => {
            tracing::error!(
                "Error handling {} event: {:?}",
                event.snake_case_name(),
                error
            );
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

async fn report(ctx: Context<'_>, error: &UserFacingError) {
    if let Err(e) = reply(ctx, embed::error_embed(ctx.author(), error)).await {
        tracing::error!(
            "Failed to send error reply for '{}': {:?}",
            ctx.command().qualified_name,
            e
        );
    }
}

pub async fn reply(ctx: Context<'_>, embed: CreateEmbed) -> Result<(), AppError> {
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

pub fn guild_id(ctx: Context<'_>) -> Result<u64, AppError> {
    ctx.guild_id()
        .map(|id| id.get())
        .ok_or_else(|| AppError::BadRequest("This command can only be used in a server.".to_string()))
}

/// Fails unless the invoking guild is on the tracking allow-list.
pub async fn require_tracked_guild(ctx: Context<'_>) -> Result<u64, AppError> {
    let guild_id = guild_id(ctx)?;
    if !ctx.data().guilds.contains(guild_id).await {
        return Err(AppError::Forbidden(
            "Tracking is not enabled in this server.".to_string(),
        ));
    }
    Ok(guild_id)
}

/// The prefix commands are invoked with in this guild.
pub async fn current_prefix(ctx: Context<'_>) -> Result<String, AppError> {
    let state = ctx.data();
    state
        .prefixes
        .resolve(&state.db, ctx.guild_id().map(|id| id.get()))
        .await
}

/// Member display name in the invoking guild, or a placeholder if it cannot be fetched.
pub async fn display_name(ctx: Context<'_>, user_id: u64) -> String {
    if user_id == ctx.author().id.get() {
        return match ctx.author_member().await {
            Some(member) => member.display_name().to_string(),
            None => ctx.author().name.clone(),
        };
    }

    let Some(guild_id) = ctx.guild_id() else {
        return format!("User {}", user_id);
    };

    match ctx.http().get_member(guild_id, UserId::new(user_id)).await {
        Ok(member) => member.display_name().to_string(),
        Err(e) => {
            tracing::warn!("Failed to fetch member {} from guild {}: {}", user_id, guild_id, e);
            format!("User {}", user_id)
        }
    }
}

/// Finds a top-level command by name or alias, case-insensitively.
pub fn find_command<'a>(commands: &'a [Command], name: &str) -> Option<&'a Command> {
    commands.iter().find(|command| {
        command.name.eq_ignore_ascii_case(name)
            || command
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    })
}
