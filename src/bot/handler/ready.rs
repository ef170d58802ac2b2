use serenity::all::{ActivityData, Context, Ready};

use crate::state::BotState;

/// Handles the ready event when the bot connects to Discord.
///
/// Fires once per gateway connection and sets the bot's activity to the help command.
pub fn handle_ready(state: &BotState, ctx: &Context, ready: &Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::playing(format!(
        "{}help",
        state.prefixes.default_prefix()
    ))));
}
