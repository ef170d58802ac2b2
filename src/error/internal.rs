use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a stored Discord ID from String
    ///
    /// IDs are persisted as strings; a value that no longer parses means the row
    /// was written by something other than this bot.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Stored counter record is not a JSON object of action code to count.
    #[error("Malformed counter record for {guild_id}:{user_id}: {reason}")]
    MalformedCounterRecord {
        guild_id: String,
        user_id: String,
        reason: String,
    },
}
