//! Interactive command-line module
//!
//! This module contains the prompt service, the menu actions and the
//! application loop that ties timers, stores and the event log together.

pub mod app;
pub mod menu;
pub mod prompt;

// Re-export main types
pub use app::App;
pub use menu::{CountdownCommand, MenuAction};
pub use prompt::{PromptError, Prompter};
