use serenity::all::FullEvent;

use crate::{error::AppError, state::BotState};

pub mod message;
pub mod ready;

/// Gateway events the bot reacts to besides prefix commands.
///
/// The framework runs command dispatch for a message before handing the same event here.
pub async fn event_handler(
    ctx: &serenity::all::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, BotState, AppError>,
    state: &BotState,
) -> Result<(), AppError> {
    match event {
        FullEvent::Ready { data_about_bot } => ready::handle_ready(state, ctx, data_about_bot),
        FullEvent::Message { new_message } => {
            message::handle_message(state, ctx, new_message).await
        }
        _ => {}
    }

    Ok(())
}
