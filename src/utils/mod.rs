//! Utility functions module
//!
//! This module contains the event log sink, time formatting and signal
//! handling used throughout the application.

pub mod event_log;
pub mod format;
pub mod signals;

// Re-export main items
pub use event_log::EventLog;
pub use format::{format_remaining, TimeFormat};
pub use signals::shutdown_signal;
