//! Completion message task

use std::sync::Arc;

use tracing::info;

use crate::{state::CompletionSignal, utils::EventLog};

/// Wait for a countdown to complete, then display and log its message once.
///
/// Returns the displayed message.
pub async fn message_waiter_task(
    message: String,
    completion: Arc<CompletionSignal>,
    log: Arc<EventLog>,
) -> String {
    completion.wait().await;

    println!("{}", message);
    info!("Displayed completion message");
    log.record(&format!("Message displayed: {}", message));

    message
}
