//! Background tasks module
//!
//! This module contains the tasks that run alongside the interactive
//! command loop: one ticking task and one message waiter per countdown.

pub mod countdown;
pub mod message_waiter;
pub mod ticker;

// Re-export main items
pub use countdown::Countdown;
pub use message_waiter::message_waiter_task;
pub use ticker::countdown_task;
