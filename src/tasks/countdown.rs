//! Running countdown handle

use std::{sync::Arc, time::Duration};

use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use super::{countdown_task, message_waiter_task};
use crate::{state::CountdownTimer, utils::EventLog};

/// A timer together with its ticking task and, once attached, its message
/// waiter. Both tasks are joined before the countdown counts as finished.
#[derive(Debug)]
pub struct Countdown {
    timer: Arc<CountdownTimer>,
    ticker: JoinHandle<()>,
    waiter: Option<JoinHandle<String>>,
    log: Arc<EventLog>,
}

impl Countdown {
    /// Spawn the ticking task for `timer`
    pub fn start(timer: Arc<CountdownTimer>, check_interval: Duration, log: Arc<EventLog>) -> Self {
        let ticker = tokio::spawn(countdown_task(Arc::clone(&timer), check_interval, Arc::clone(&log)));

        Self {
            timer,
            ticker,
            waiter: None,
            log,
        }
    }

    /// Spawn the message waiter. Only the first message is used.
    pub fn attach_message(&mut self, message: String) {
        if self.waiter.is_some() {
            debug!("Countdown '{}' already has a message waiter", self.timer.name());
            return;
        }

        self.waiter = Some(tokio::spawn(message_waiter_task(
            message,
            self.timer.completion(),
            Arc::clone(&self.log),
        )));
    }

    pub fn timer(&self) -> &Arc<CountdownTimer> {
        &self.timer
    }

    /// Wait for both tasks to end. Returns the displayed message, if any.
    ///
    /// A failed ticker never fires the completion signal, so the waiter is
    /// aborted instead of being left parked.
    pub async fn join(self) -> Result<Option<String>, JoinError> {
        if let Err(e) = self.ticker.await {
            if let Some(waiter) = &self.waiter {
                waiter.abort();
            }
            return Err(e);
        }

        match self.waiter {
            Some(waiter) => waiter.await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn join_waits_for_ticker_and_message() {
        let start = Instant::now();
        let timer = Arc::new(CountdownTimer::new("eggs", 3).unwrap());
        let mut countdown = Countdown::start(timer, Duration::from_secs(1), Arc::new(EventLog::disabled()));
        countdown.attach_message("Eggs are done".to_string());
        countdown.attach_message("ignored".to_string());

        let timer = Arc::clone(countdown.timer());
        let message = countdown.join().await.unwrap();

        assert_eq!(message.as_deref(), Some("Eggs are done"));
        assert!(timer.is_complete());
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn join_without_message() {
        let timer = Arc::new(CountdownTimer::new("quiet", 1).unwrap());
        let countdown = Countdown::start(timer, Duration::from_secs(1), Arc::new(EventLog::disabled()));
        assert_eq!(countdown.join().await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_ticker_aborts_the_waiter() {
        let timer = Arc::new(CountdownTimer::new("broken", 5).unwrap());
        let mut countdown = Countdown {
            timer,
            ticker: tokio::spawn(async { panic!("ticker failed") }),
            waiter: None,
            log: Arc::new(EventLog::disabled()),
        };
        countdown.attach_message("never shown".to_string());
        let waiter = countdown.waiter.as_ref().unwrap().abort_handle();

        let err = countdown.join().await.unwrap_err();
        assert!(err.is_panic());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(waiter.is_finished());
    }
}
