//! Error types for datebook-engine operations.
//!
//! Scheduling conflicts are not errors: they are reported through
//! [`crate::mutation::MutationOutcome::Conflict`].

use thiserror::Error;

/// Rejections raised while validating an event form, before anything reaches
/// the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Event title is required")]
    MissingTitle,

    #[error("Event date is required")]
    MissingDate,

    #[error("Event start time is required")]
    MissingStartTime,

    #[error("Event end time is required")]
    MissingEndTime,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
}

/// Failures of the storage collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode events: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
