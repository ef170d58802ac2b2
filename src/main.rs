mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use crate::{config::Config, error::AppError, state::BotState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    startup::init_tracing(&config);

    let db = startup::connect_to_database(&config).await?;
    let state = BotState::load(db, config).await?;

    tracing::info!("Starting turtlebot");

    let bot_client = bot::start::init_bot(state).await?;

    bot::start::start_bot(bot_client).await
}
