//! Error types for calplus.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in calplus operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid timestamp '{0}'. Expected YYYY-MM-DDTHH:MM")]
    InvalidTimestamp(String),

    #[error("Unknown repeat mode '{0}'. Expected none, daily, weekly or yearly")]
    InvalidRepeat(String),

    #[error("Event title must not be empty")]
    EmptyTitle,

    #[error("End time must be later than start time")]
    InvalidSpan,

    #[error("Priority level {0} is out of range (0-3)")]
    InvalidLevel(u8),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlannerError {
    /// Whether the error was caused by bad input rather than a failing backend.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PlannerError::InvalidDate(_)
                | PlannerError::InvalidMonth(_)
                | PlannerError::InvalidTimestamp(_)
                | PlannerError::InvalidRepeat(_)
                | PlannerError::EmptyTitle
                | PlannerError::InvalidSpan
                | PlannerError::InvalidLevel(_)
        )
    }
}

/// Result type alias for calplus operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
