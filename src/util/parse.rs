use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a user argument given either as a mention (`<@123>`, `<@!123>`) or a raw ID.
///
/// # Returns
/// - `Some(u64)` - The referenced user ID
/// - `None` - The argument is neither a mention nor a numeric ID
pub fn parse_user_arg(arg: &str) -> Option<u64> {
    let trimmed = arg
        .strip_prefix("<@")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|rest| rest.trim_start_matches('!'))
        .unwrap_or(arg);

    trimmed.parse::<u64>().ok()
}

/// Parses an hour bucket timestamp in `YYYY-MM-DD-HH` form (UTC).
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - Start of the given hour
/// - `Err(AppError::BadRequest)` - Value is not a valid hour timestamp
pub fn parse_bucket_hour(value: &str) -> Result<DateTime<Utc>, AppError> {
    NaiveDateTime::parse_from_str(&format!("{}:00:00", value), "%Y-%m-%d-%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            AppError::BadRequest(format!(
                "`{}` is not a valid hour, expected YYYY-MM-DD-HH (UTC)",
                value
            ))
        })
}
