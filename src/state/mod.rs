//! State management module
//!
//! This module contains the countdown state machine, its completion signal
//! and the session registry that holds every timer.

pub mod completion;
pub mod error;
pub mod registry;
pub mod timer;

// Re-export main types
pub use completion::CompletionSignal;
pub use error::{RegistryError, TimerError};
pub use registry::TimerRegistry;
pub use timer::{CountdownTimer, TickOutcome, TimerPhase, TimerStatus};
