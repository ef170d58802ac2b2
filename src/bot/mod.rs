//! Discord gateway integration.
//!
//! The bot runs on a poise framework of prefix commands. Framework setup starts the
//! scheduler on the bot's HTTP client so that rollups can resolve members, edit roles and
//! post announcements without a second connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild and role data for the cache used by permission checks
//! - `GUILD_MESSAGES` - Tracked commands, game bot replies and prefix commands
//! - `MESSAGE_CONTENT` - Message text (privileged intent)
//! - `GUILD_MEMBERS` - Member listings for milestone role revocation (privileged intent)
//!
//! Both privileged intents must be enabled in the Discord Developer Portal.

pub mod command;
pub mod directory;
pub mod embed;
pub mod handler;
pub mod start;
