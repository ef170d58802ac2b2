//! Points, shop and inventory commands.

use serenity::all::User;

use crate::{
    bot::{
        command::{self, Context},
        embed,
    },
    error::AppError,
    model::economy::CreateShopItemParam,
    service::economy::{PointsService, ShopService},
};

/// Points balance for you or another user.
#[poise::command(prefix_command, subcommands("give"))]
pub async fn points(ctx: Context<'_>, user: Option<User>) -> Result<(), AppError> {
    let user_id = user.as_ref().unwrap_or(ctx.author()).id.get();
    let balance = PointsService::new(&ctx.data().db)
        .balance(user_id)
        .await?;
    let name = command::display_name(ctx, user_id).await;

    command::reply(
        ctx,
        embed::default_embed(ctx.author())
            .title("Points")
            .description(format!("{} has **{}** points.", name, balance.points)),
    )
    .await
}

/// Add points to (or with a negative amount, take points from) a user.
///
/// Usage: `points give <@user> <amount>`
#[poise::command(prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn give(ctx: Context<'_>, user: User, amount: i64) -> Result<(), AppError> {
    let user_id = user.id.get();
    let balance = PointsService::new(&ctx.data().db)
        .award(user_id, amount)
        .await?;
    tracing::info!(
        "User {} gave {} points to {}",
        ctx.author().id,
        amount,
        user_id
    );

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Points Updated",
            format!("<@{}> now has **{}** points.", user_id, balance.points),
        ),
    )
    .await
}

/// Items for sale.
#[poise::command(prefix_command, subcommands("add", "remove"))]
pub async fn shop(ctx: Context<'_>) -> Result<(), AppError> {
    let items = ShopService::new(&ctx.data().db).catalog().await?;

    let description = if items.is_empty() {
        "The shop is empty.".to_string()
    } else {
        items
            .iter()
            .map(|item| format!("**{}** - {} points", embed::title_case(&item.name), item.price))
            .collect::<Vec<_>>()
            .join("\n")
    };

    command::reply(
        ctx,
        embed::default_embed(ctx.author())
            .title("Shop")
            .description(description),
    )
    .await
}

/// Put an item up for sale.
///
/// Usage: `shop add <price> <name>`
#[poise::command(prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn add(ctx: Context<'_>, price: i64, #[rest] name: String) -> Result<(), AppError> {
    let item = ShopService::new(&ctx.data().db)
        .add_item(CreateShopItemParam { name, price })
        .await?;

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Item Added",
            format!("**{}** can now be bought for {} points.", item.name, item.price),
        ),
    )
    .await
}

/// Take an item off sale.
///
/// Usage: `shop remove <name>`
#[poise::command(prefix_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn remove(ctx: Context<'_>, #[rest] name: String) -> Result<(), AppError> {
    ShopService::new(&ctx.data().db).remove_item(&name).await?;

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Item Removed",
            format!("**{}** was removed from the shop.", name.trim()),
        ),
    )
    .await
}

/// Buy an item with your points.
///
/// Usage: `buy <name>`
#[poise::command(prefix_command)]
pub async fn buy(ctx: Context<'_>, #[rest] name: String) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Usage: `buy <name>`".to_string()));
    }

    let purchase = ShopService::new(&ctx.data().db)
        .buy(ctx.author().id.get(), &name)
        .await?;

    command::reply(
        ctx,
        embed::success_embed(
            ctx.author(),
            "Purchase Complete",
            format!(
                "You bought **{}** for {} points. You now own {} and have {} points left.",
                purchase.item.name,
                purchase.item.price,
                purchase.quantity_owned,
                purchase.remaining_points
            ),
        ),
    )
    .await
}

/// Items you or another user own.
#[poise::command(prefix_command, aliases("inv"))]
pub async fn inventory(ctx: Context<'_>, user: Option<User>) -> Result<(), AppError> {
    let user_id = user.as_ref().unwrap_or(ctx.author()).id.get();
    let entries = ShopService::new(&ctx.data().db)
        .inventory(user_id)
        .await?;
    let name = command::display_name(ctx, user_id).await;

    let description = if entries.is_empty() {
        format!("{} does not own any items.", name)
    } else {
        entries
            .iter()
            .map(|entry| format!("**{}** x{}", embed::title_case(&entry.item_name), entry.quantity))
            .collect::<Vec<_>>()
            .join("\n")
    };

    command::reply(
        ctx,
        embed::default_embed(ctx.author())
            .title(format!("{}'s Inventory", name))
            .description(description),
    )
    .await
}
