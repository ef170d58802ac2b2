//! Best-effort item drop scraping from hunt confirmations.
//!
//! The game bot reports loot on lines like `**turtle** got a <:wolfskin:12345> wolf skin`.
//! Anything that does not look like that is ignored; a confirmation without loot and
//! one we fail to understand are indistinguishable.

use std::sync::LazyLock;

use regex::Regex;

static DROP_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)\bgot an? (.+)$").unwrap());
static CUSTOM_EMOJI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<a?:\w+:\d+>").unwrap());

/// Extracts item names from a confirmation text, lowercase, one per loot line.
pub fn parse_item_drops(text: &str) -> Vec<String> {
    DROP_LINE
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|item| {
            let without_emoji = CUSTOM_EMOJI.replace_all(item.as_str(), "");
            without_emoji
                .replace("**", "")
                .replace("__", "")
                .trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | '!' | '.' | ':'))
                .to_lowercase()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests a typical loot line with a custom emoji.
    ///
    /// Expected: emoji and markup removed
    #[test]
    fn strips_markup_and_emoji() {
        let text = "**Turtle** found and killed a **WOLF**\n\
                    Earned 120 coins and 45 XP\n\
                    **Turtle** got a <:wolfskin:545396442159874048> **Wolf Skin**";

        assert_eq!(parse_item_drops(text), vec!["wolf skin".to_string()]);
    }

    /// Tests several loot lines and the `an` article.
    ///
    /// Expected: one item per line, in order
    #[test]
    fn parses_every_loot_line() {
        let text = "turtle got an <a:eye:1> zombie eye\nturtle got a unicorn horn!";

        assert_eq!(
            parse_item_drops(text),
            vec!["zombie eye".to_string(), "unicorn horn".to_string()]
        );
    }

    /// Tests confirmations without loot.
    ///
    /// Expected: empty
    #[test]
    fn no_loot_is_empty() {
        assert!(parse_item_drops("**Turtle** found and killed a **Wolf**").is_empty());
        assert!(parse_item_drops("turtle got a <:x:1>").is_empty());
    }
}
