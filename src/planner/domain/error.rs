//! Error types for planner domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlannerDomainError {
    /// The task text is empty after trimming.
    #[error("task text must not be empty")]
    EmptyTaskText,

    /// The time-of-day value is not zero-padded 24-hour `HH:MM`.
    #[error("invalid time '{0}', expected zero-padded 24-hour HH:MM")]
    InvalidTime(String),
}
