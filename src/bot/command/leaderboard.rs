use crate::{
    bot::{
        command::{self, Context},
        embed,
    },
    error::AppError,
    model::leaderboard::Board,
};

const DEFAULT_TOP: i64 = 5;
const MIN_TOP: i64 = 3;
const MAX_TOP: i64 = 10;

fn parse_top(top: Option<i64>) -> usize {
    top.unwrap_or(DEFAULT_TOP).clamp(MIN_TOP, MAX_TOP) as usize
}

/// Top hunters and points holders.
///
/// Usage: `leaderboard [3-10]`. Weekly boards reset Monday at 00:00 UTC.
#[poise::command(prefix_command, guild_only, aliases("lb", "top"))]
pub async fn leaderboard(ctx: Context<'_>, top: Option<i64>) -> Result<(), AppError> {
    command::require_tracked_guild(ctx).await?;
    let top = parse_top(top);

    let bot_name = ctx.cache().current_user().name.clone();
    let mut embed = embed::default_embed(ctx.author())
        .title(format!("{} Leaderboards (Top {})", bot_name, top));

    for (i, board) in Board::ALL.into_iter().enumerate() {
        let entries = ctx.data().leaderboards.get(board).await;
        embed = embed.field(board.title(), embed::board_block(&entries, top), true);
        if i == 1 {
            embed = embed::spacer(embed);
        }
    }

    command::reply(ctx, embed).await
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the default and clamping of the entry count.
    ///
    /// Expected: 5 by default, clamped into 3..=10
    #[test]
    fn clamps_top() {
        assert_eq!(parse_top(None), 5);
        assert_eq!(parse_top(Some(1)), 3);
        assert_eq!(parse_top(Some(7)), 7);
        assert_eq!(parse_top(Some(50)), 10);
        assert_eq!(parse_top(Some(-4)), 3);
    }
}
