use serenity::all::{Client, GatewayIntents};

use crate::{bot::command, error::AppError, scheduler, state::BotState};

/// Builds the Discord client with the command framework attached.
///
/// Framework setup runs on the first ready event; it starts the rollup scheduler on the
/// bot's HTTP client and hands the state to commands and the event handler.
///
/// # Arguments
/// - `state` - Shared bot state
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(state: BotState) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let token = state.config.discord_bot_token.clone();
    let options = command::framework_options(&state);

    let framework = poise::Framework::builder()
        .options(options)
        .setup(move |ctx, _ready, _framework| {
            Box::pin(async move {
                // Rollups share the bot's HTTP client
                let scheduler_state = state.clone();
                let http = ctx.http.clone();
                tokio::spawn(async move {
                    if let Err(e) = scheduler::rollup::start_scheduler(scheduler_state, http).await {
                        tracing::error!("Rollup scheduler error: {}", e);
                    }
                });

                Ok(state)
            })
        })
        .build();

    let client = Client::builder(&token, intents)
        .framework(framework)
        .await?;

    Ok(client)
}

/// Connects to the gateway and runs until shutdown.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot");

    client.start().await?;

    Ok(())
}
