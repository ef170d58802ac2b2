//! Error types and user-facing failure reporting.
//!
//! This module provides the bot's error hierarchy. `AppError` is the top-level error
//! type returned by services and command handlers. The framework error hook is the single
//! place where an `AppError` is turned into a user-visible embed; see
//! [`AppError::user_facing`].

pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur while handling events, commands
/// and scheduled jobs. Most variants use `#[from]` for automatic conversion so that `?`
/// works across the repository, service and bot layers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Unexpected internal state, typically malformed stored data.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// JSON (de)serialization error for stored documents.
    #[error(transparent)]
    SerdeErr(#[from] serde_json::Error),

    /// Requested resource (member, item, record) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or out-of-range command argument. Rejected before any mutation.
    #[error("{0}")]
    BadRequest(String),

    /// Caller lacks the role or permission required for the command.
    #[error("{0}")]
    Forbidden(String),

    /// Internal error with custom message.
    ///
    /// The message is logged but a generic message is shown to the user.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// What the framework error hook shows for a failed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFacingError {
    pub title: &'static str,
    pub description: String,
}

impl AppError {
    /// Maps the error onto a title and description safe to show in a channel.
    ///
    /// Argument, lookup and permission errors carry their own message. Everything
    /// else is reported generically; the caller is expected to log the full error.
    pub fn user_facing(&self) -> UserFacingError {
        match self {
            Self::BadRequest(msg) => UserFacingError {
                title: "Invalid Argument",
                description: msg.clone(),
            },
            Self::NotFound(msg) => UserFacingError {
                title: "Not Found",
                description: msg.clone(),
            },
            Self::Forbidden(msg) => UserFacingError {
                title: "Forbidden",
                description: msg.clone(),
            },
            _ => UserFacingError {
                title: "Command Error",
                description: "Something went wrong while running this command.".to_string(),
            },
        }
    }

    /// Whether the error is an expected user mistake rather than a fault worth logging.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest(_) | Self::NotFound(_) | Self::Forbidden(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that argument errors keep their message for the user.
    ///
    /// Expected: "Invalid Argument" title with the original message
    #[test]
    fn bad_request_is_shown_verbatim() {
        let err = AppError::BadRequest("Unknown event code `42`".to_string());
        let shown = err.user_facing();

        assert_eq!(shown.title, "Invalid Argument");
        assert_eq!(shown.description, "Unknown event code `42`");
        assert!(err.is_user_error());
    }

    /// Tests that store failures are reported generically.
    ///
    /// Expected: generic title, no database detail leaked
    #[test]
    fn database_errors_are_generic() {
        let err = AppError::DbErr(sea_orm::DbErr::Custom("connection refused".to_string()));
        let shown = err.user_facing();

        assert_eq!(shown.title, "Command Error");
        assert!(!shown.description.contains("connection refused"));
        assert!(!err.is_user_error());
    }
}
