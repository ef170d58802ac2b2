//! Message handling: pending confirmations and activity tracking.
//!
//! Prefix commands are dispatched by the framework before the message reaches here.

use serenity::all::{ChannelId, Context, CreateEmbed, CreateMessage, Message};

use crate::{
    bot::directory::DiscordDirectory,
    model::{
        activity::ConfirmedEvent, cadence::CadenceReport, message::InboundMessage,
    },
    service::activity::{ActivityOutcome, ActivityService},
    state::BotState,
};

/// Converts a gateway message into the tracker's view of it.
pub fn to_inbound(message: &Message) -> InboundMessage {
    InboundMessage {
        id: message.id.get(),
        guild_id: message.guild_id.map(|id| id.get()),
        channel_id: message.channel_id.get(),
        author_id: message.author.id.get(),
        author_name: message.author.name.clone(),
        author_is_bot: message.author.bot,
        content: message.content.clone(),
        embed_count: message.embeds.len(),
        author_role_ids: message
            .member
            .as_ref()
            .map(|member| member.roles.iter().map(|role| role.get()).collect())
            .unwrap_or_default(),
    }
}

/// Handle message creation in a channel
///
/// Every message is first offered to pending confirmations. A human message that
/// answered one is consumed; bot messages stop there. Everything else is handed to the
/// tracker.
pub async fn handle_message(state: &BotState, ctx: &Context, message: &Message) {
    let inbound = to_inbound(message);

    let consumed = state.confirmations.offer(&inbound).await;
    if inbound.author_is_bot || consumed {
        return;
    }

    let Some(event) = state.tracker.on_inbound_message(&inbound).await else {
        return;
    };

    let outcome = match ActivityService::new(&state.db)
        .record(&event, &state.config.milestones)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                "Failed to record {} for {:?}: {:?}",
                event.action.label(),
                event.subject,
                e
            );
            return;
        }
    };

    apply_outcome(state, ctx, &inbound, &event, outcome).await;
}

/// Performs the Discord side effects of a recorded event.
async fn apply_outcome(
    state: &BotState,
    ctx: &Context,
    inbound: &InboundMessage,
    event: &ConfirmedEvent,
    outcome: ActivityOutcome,
) {
    if let Some(role_id) = outcome.milestone_role {
        grant_milestone_role(state, ctx, inbound, event, role_id).await;
    }

    if let Some(report) = outcome.cadence.filter(CadenceReport::is_suspicious) {
        report_cadence(state, ctx, &report).await;
    }
}

/// Grants a milestone role in the home guild if the member does not hold it yet.
async fn grant_milestone_role(
    state: &BotState,
    ctx: &Context,
    inbound: &InboundMessage,
    event: &ConfirmedEvent,
    role_id: u64,
) {
    let Some(home_guild_id) = state.config.home_guild_id else {
        return;
    };
    if event.subject.guild_id != home_guild_id || inbound.author_role_ids.contains(&role_id) {
        return;
    }

    let directory = DiscordDirectory::new(ctx.http.clone());
    match directory
        .grant_role(home_guild_id, event.subject.user_id, role_id, "Weekly hunt milestone")
        .await
    {
        Ok(()) => tracing::info!(
            "Granted milestone role {} to user {}",
            role_id,
            event.subject.user_id
        ),
        Err(e) => tracing::error!(
            "Failed to grant milestone role {} to user {}: {:?}",
            role_id,
            event.subject.user_id,
            e
        ),
    }
}

fn cadence_embed(report: &CadenceReport) -> CreateEmbed {
    let deltas = report
        .percent_deltas
        .iter()
        .map(|delta| delta.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    CreateEmbed::new()
        .title("Possible Bot Detected!")
        .description(
            "I might have found a bot, or someone who is very quick. \
             The rest of these numbers are specialized details.",
        )
        .field("Percent Deltas", deltas, true)
        .field("Amount below threshold", report.within_tolerance.to_string(), true)
        .field("Culprit", format!("<@{}>", report.user_id), false)
}

/// Logs a suspicious hunt cadence and posts it to the announcement channel, if any.
async fn report_cadence(state: &BotState, ctx: &Context, report: &CadenceReport) {
    tracing::warn!(
        "Possible bot: user {} had {} near-identical hunt intervals",
        report.user_id,
        report.within_tolerance
    );

    let Some(channel_id) = state.config.announce_channel_id else {
        return;
    };

    if let Err(e) = ChannelId::new(channel_id)
        .send_message(&ctx.http, CreateMessage::new().embed(cadence_embed(report)))
        .await
    {
        tracing::error!("Failed to post cadence alert to {}: {:?}", channel_id, e);
    }
}
