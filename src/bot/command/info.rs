use crate::{
    bot::{
        command::{self, Command, Context},
        embed,
    },
    error::AppError,
};

/// Resolves `help` arguments such as `stats set` to a command or subcommand.
fn find_help_target<'a>(commands: &'a [Command], query: &str) -> Option<&'a Command> {
    let mut words = query.split_whitespace();
    let mut found = command::find_command(commands, words.next()?)?;
    for word in words {
        found = command::find_command(&found.subcommands, word)?;
    }
    Some(found)
}

fn usage(command: &Command) -> String {
    command
        .help_text
        .clone()
        .or_else(|| command.description.clone())
        .unwrap_or_else(|| "No description.".to_string())
}

/// List commands, or show how to use one.
///
/// Usage: `help [command]`
#[poise::command(prefix_command)]
pub async fn help(ctx: Context<'_>, #[rest] command: Option<String>) -> Result<(), AppError> {
    let prefix = command::current_prefix(ctx).await?;
    let commands = &ctx.framework().options().commands;

    let embed = match command {
        Some(query) => {
            let found = find_help_target(commands, &query)
                .ok_or_else(|| AppError::NotFound(format!("No command called `{}` found.", query)))?;

            let mut embed = embed::default_embed(ctx.author())
                .title(format!("{}{}", prefix, found.qualified_name))
                .description(usage(found));
            if !found.aliases.is_empty() {
                embed = embed.field("Aliases", found.aliases.join(", "), false);
            }
            if !found.subcommands.is_empty() {
                let names = found
                    .subcommands
                    .iter()
                    .map(|sub| format!("`{}`", sub.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                embed = embed.field("Subcommands", names, false);
            }
            embed
        }
        None => {
            let mut embed = embed::default_embed(ctx.author())
                .title("TurtleBot Help")
                .description(format!(
                    "Use `{}help <command>` for more on a command.",
                    prefix
                ));
            for command in commands.iter().filter(|c| !c.hide_in_help) {
                embed = embed.field(
                    format!("{}{}", prefix, command.name),
                    command.description.as_deref().unwrap_or("No description."),
                    false,
                );
            }
            embed
        }
    };

    command::reply(ctx, embed).await
}

/// About the bot.
#[poise::command(prefix_command)]
pub async fn info(ctx: Context<'_>) -> Result<(), AppError> {
    let (bot_name, guild_count) = {
        let cache = ctx.cache();
        (cache.current_user().name.clone(), cache.guild_count())
    };

    command::reply(
        ctx,
        embed::default_embed(ctx.author())
            .title(format!("{} Info", bot_name))
            .description("Tracks RPG hunts and epic events, runs weekly leaderboards and a points shop.")
            .field("Stats", format!("{} servers", guild_count), true)
            .field("Owner", format!("<@{}>", ctx.data().config.dev_id), true),
    )
    .await
}

/// Show the command prefix for this server.
#[poise::command(prefix_command, subcommands("set"))]
pub async fn prefix(ctx: Context<'_>) -> Result<(), AppError> {
    let current = command::current_prefix(ctx).await?;

    command::reply(
        ctx,
        embed::default_embed(ctx.author())
            .title("Prefix")
            .description(format!("The prefix here is `{}`.", current)),
    )
    .await
}

/// Change the command prefix for this server.
///
/// Usage: `prefix set <new>`. At most five characters, no spaces.
#[poise::command(prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn set(ctx: Context<'_>, new: String) -> Result<(), AppError> {
    let guild_id = command::guild_id(ctx)?;
    let state = ctx.data();
    state.prefixes.set(&state.db, guild_id, &new).await?;
    tracing::info!("Guild {} prefix set to '{}'", guild_id, new);

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Prefix Updated",
            format!("The prefix here is now `{}`.", new),
        ),
    )
    .await
}
