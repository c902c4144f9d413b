//! Countdown - concurrent named countdowns from the command line
//!
//! This library provides the countdown state machine, the background tasks
//! that tick it and announce its completion, file-backed stores for saved
//! configurations and preferences, and the interactive session around them.

pub mod cli;
pub mod config;
pub mod state;
pub mod store;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use cli::App;
pub use config::Config;
pub use state::{CompletionSignal, CountdownTimer, TimerRegistry, TimerStatus};
pub use tasks::Countdown;
pub use utils::{shutdown_signal, EventLog};
