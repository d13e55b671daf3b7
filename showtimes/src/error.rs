//! Error types for the showtime board.
//!
//! Nothing here is fatal: every error is the failure of one local operation
//! and is surfaced to the caller, who may retry.

use crate::types::ShowtimeId;
use thiserror::Error;

/// Errors parsing filter values coming from the admin UI
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFilterError {
    /// Unknown temporal category
    #[error("unknown date filter: {0}")]
    UnknownDateFilter(String),

    /// Unknown status filter
    #[error("unknown status filter: {0}")]
    UnknownStatusFilter(String),

    /// Custom date is not `YYYY-MM-DD`
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// Failures reported by the remote showtime directory
///
/// `Clone` so it can travel inside board actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The directory has no showtime with this id
    #[error("showtime {0} not found")]
    NotFound(ShowtimeId),

    /// The directory refused the request
    #[error("request rejected: {}", message.as_deref().unwrap_or("no details"))]
    Rejected {
        /// Message supplied by the directory, if any
        message: Option<String>,
    },

    /// The request never got an answer
    #[error("transport failure: {0}")]
    Transport(String),
}

impl DirectoryError {
    /// Creates a rejection carrying the directory's message
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// Message to show the admin
    ///
    /// Prefers the collaborator's own message; falls back to `fallback`
    /// when there is none.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            Self::Transport(message) if !message.trim().is_empty() => message.clone(),
            Self::NotFound(id) => format!("Showtime {id} no longer exists"),
            Self::Rejected { .. } | Self::Transport(_) => fallback.to_string(),
        }
    }
}

/// Errors returned by [`crate::admin::ShowtimeAdmin`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The directory call behind the operation failed
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The effect cascade finished without the expected outcome event
    #[error("{operation} finished without reporting an outcome")]
    MissingOutcome {
        /// Operation that was waiting
        operation: &'static str,
    },
}

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;
