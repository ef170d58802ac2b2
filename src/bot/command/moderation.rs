//! Kick, ban and unban.

use serenity::all::{Guild, GuildId, Member, RoleId, User};

use crate::{
    bot::{
        command::{self, Context},
        embed,
    },
    error::AppError,
};

const NO_REASON: &str = "No reason given.";

/// Discord rejected the action, usually because the bot's role is too low.
fn discord_failure(e: serenity::Error, action: &str) -> AppError {
    if let serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response)) = &e {
        if response.status_code.as_u16() == 403 {
            return AppError::Forbidden(format!(
                "I do not have permission to {} this user. Make sure my role is above theirs.",
                action
            ));
        }
    }
    e.into()
}

fn reason_or_default(reason: Option<String>) -> String {
    reason
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| NO_REASON.to_string())
}

fn top_position(guild: &Guild, roles: &[RoleId]) -> u16 {
    roles
        .iter()
        .filter_map(|id| guild.roles.get(id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0)
}

/// Compares top role positions for a moderation action.
///
/// The target must sit strictly below the bot, and strictly below the author unless the
/// author is exempt (`author_top` is `None`).
fn check_positions(
    action: &str,
    target_top: u16,
    author_top: Option<u16>,
    bot_top: u16,
) -> Result<(), AppError> {
    if target_top >= bot_top {
        return Err(AppError::Forbidden(format!(
            "I cannot {} someone who has the same role or higher than me.",
            action
        )));
    }

    if author_top.is_some_and(|author_top| target_top >= author_top) {
        return Err(AppError::Forbidden(format!(
            "You cannot {} someone who has the same role or higher than you.",
            action
        )));
    }

    Ok(())
}

/// Rejects the guild owner, and any target not below both the bot and the author.
///
/// The guild owner and the bot owner are exempt from the author comparison.
async fn check_hierarchy(
    ctx: Context<'_>,
    guild_id: GuildId,
    target: &Member,
    action: &str,
) -> Result<(), AppError> {
    let bot_id = ctx.cache().current_user().id;
    let bot = guild_id.member(ctx.serenity_context(), bot_id).await?;
    let author_roles = ctx
        .author_member()
        .await
        .map(|member| member.roles.clone())
        .unwrap_or_default();

    let (owner_id, target_top, author_top, bot_top) = {
        let guild = ctx
            .guild()
            .ok_or_else(|| AppError::NotFound("This server is not cached yet.".to_string()))?;
        (
            guild.owner_id,
            top_position(&guild, &target.roles),
            top_position(&guild, &author_roles),
            top_position(&guild, &bot.roles),
        )
    };

    if target.user.id == owner_id {
        return Err(AppError::Forbidden(format!(
            "You cannot {} the server owner.",
            action
        )));
    }

    let author = ctx.author().id;
    let exempt = author == owner_id || ctx.framework().options().owners.contains(&author);

    check_positions(action, target_top, (!exempt).then_some(author_top), bot_top)
}

/// Kick a member.
///
/// Usage: `kick <@user> [reason]`
#[poise::command(
    prefix_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "KICK_MEMBERS"
)]
pub async fn kick(ctx: Context<'_>, user: User, #[rest] reason: Option<String>) -> Result<(), AppError> {
    let guild_id = GuildId::new(command::guild_id(ctx)?);
    let member = guild_id
        .member(ctx.serenity_context(), user.id)
        .await
        .map_err(|_| AppError::NotFound("You cannot act on a user who is not in the server.".to_string()))?;
    check_hierarchy(ctx, guild_id, &member, "kick").await?;

    let reason = reason_or_default(reason);
    let audit = format!("Kicked by {}. Reason: {}", ctx.author().name, reason);
    ctx.http()
        .kick_member(guild_id, user.id, Some(&audit))
        .await
        .map_err(|e| discord_failure(e, "kick"))?;

    tracing::info!("User {} kicked {} from guild {}", ctx.author().id, user.id, guild_id);

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Member Kicked",
            format!(
                "<@{}> has been kicked by <@{}>.\nReason: {}",
                user.id,
                ctx.author().id,
                reason
            ),
        ),
    )
    .await
}

/// Ban a user, in the server or not.
///
/// Usage: `ban <@user|id> [reason]`
#[poise::command(
    prefix_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn ban(ctx: Context<'_>, user: User, #[rest] reason: Option<String>) -> Result<(), AppError> {
    let guild_id = GuildId::new(command::guild_id(ctx)?);

    // Users outside the guild can still be banned pre-emptively.
    if let Ok(member) = guild_id.member(ctx.serenity_context(), user.id).await {
        check_hierarchy(ctx, guild_id, &member, "ban").await?;
    }

    let reason = reason_or_default(reason);
    let audit = format!("Banned by {}. Reason: {}", ctx.author().name, reason);
    ctx.http()
        .ban_user(guild_id, user.id, 0, Some(&audit))
        .await
        .map_err(|e| discord_failure(e, "ban"))?;

    tracing::info!("User {} banned {} from guild {}", ctx.author().id, user.id, guild_id);

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Member Banned",
            format!(
                "<@{}> has been banned by <@{}>.\nReason: {}",
                user.id,
                ctx.author().id,
                reason
            ),
        ),
    )
    .await
}

/// Lift a ban.
///
/// Usage: `unban <id> [reason]`
#[poise::command(
    prefix_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn unban(ctx: Context<'_>, user: User, #[rest] reason: Option<String>) -> Result<(), AppError> {
    let guild_id = GuildId::new(command::guild_id(ctx)?);

    let reason = reason_or_default(reason);
    let audit = format!("Un-banned by {}. Reason: {}", ctx.author().name, reason);
    ctx.http()
        .remove_ban(guild_id, user.id, Some(&audit))
        .await
        .map_err(|e| discord_failure(e, "unban"))?;

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "User Unbanned",
            format!(
                "<@{}> has been unbanned by <@{}>.\nReason: {}",
                user.id,
                ctx.author().id,
                reason
            ),
        ),
    )
    .await
}
