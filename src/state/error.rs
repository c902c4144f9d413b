//! Error types for timer state

use thiserror::Error;

/// Errors raised by timer commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Durations are whole, positive seconds
    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(u64),

    /// Complete is terminal; the completion signal has already fired
    #[error("countdown '{0}' is already complete")]
    AlreadyComplete(String),
}

/// Errors raised by the timer registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a countdown named '{0}' already exists")]
    DuplicateName(String),
}
