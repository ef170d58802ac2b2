//! Embed builders and text formatting for command replies.

use rand::Rng;
use serenity::all::{Colour, CreateEmbed, CreateEmbedAuthor, Timestamp, User};

use crate::{error::UserFacingError, model::leaderboard::RankedEntry};

pub const NO_RECORDS: &str = "No records found.";

/// Neutral embed attributed to the invoking user, with a random colour.
pub fn default_embed(author: &User) -> CreateEmbed {
    let colour = rand::rng().random_range(0..=0xFF_FF_FFu32);

    CreateEmbed::new()
        .author(CreateEmbedAuthor::new(&author.name).icon_url(author.face()))
        .timestamp(Timestamp::now())
        .colour(Colour::new(colour))
}

pub fn success_embed(author: &User, title: impl Into<String>, description: impl Into<String>) -> CreateEmbed {
    default_embed(author)
        .title(title)
        .description(description)
        .colour(Colour::DARK_GREEN)
}

pub fn error_embed(author: &User, error: &UserFacingError) -> CreateEmbed {
    default_embed(author)
        .title(error.title)
        .description(&error.description)
        .colour(Colour::RED)
}

/// Zero-width field used to break an embed's inline fields onto a new row.
pub fn spacer(embed: CreateEmbed) -> CreateEmbed {
    embed.field("\u{200b}", "\u{200b}", false)
}

/// Renders the first `top` entries of a board as a numbered code block.
pub fn board_block(entries: &[RankedEntry], top: usize) -> String {
    let lines: Vec<String> = entries
        .iter()
        .take(top)
        .enumerate()
        .map(|(i, entry)| format!("{}. {} - {}", i + 1, entry.display_name, entry.score))
        .collect();

    if lines.is_empty() {
        format!("```\n{}\n```", NO_RECORDS)
    } else {
        format!("```\n{}\n```", lines.join("\n"))
    }
}

/// Renders `label: count` lines with a leading total, or `empty` when there is nothing.
pub fn count_lines(counts: &[(String, i64)], empty: &str) -> String {
    if counts.is_empty() {
        return empty.to_string();
    }

    let total: i64 = counts.iter().map(|(_, count)| count).sum();
    std::iter::once(format!("**Total:** {}", total))
        .chain(
            counts
                .iter()
                .map(|(label, count)| format!("**{}:** {}", title_case(label), count)),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
