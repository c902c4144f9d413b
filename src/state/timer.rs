//! Countdown timer state machine

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionSignal, TimerError};

/// Lifecycle phase of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Running,
    Paused,
    /// Terminal. Remaining is zero and the completion signal has fired.
    Complete,
}

/// Immutable snapshot of a timer taken under its lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerStatus {
    pub name: String,
    pub duration: u64,
    pub remaining: u64,
    pub paused: bool,
    pub phase: TimerPhase,
}

impl TimerStatus {
    /// Check if the timer has reached zero
    pub fn is_complete(&self) -> bool {
        self.phase == TimerPhase::Complete
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off; carries the new remaining value
    Decremented(u64),
    /// Timer is paused, nothing changed
    Paused,
    /// Timer is (now) complete
    Complete,
}

#[derive(Debug)]
struct TimerInner {
    duration: u64,
    remaining: u64,
    paused: bool,
    complete: bool,
}

impl TimerInner {
    fn phase(&self) -> TimerPhase {
        if self.complete {
            TimerPhase::Complete
        } else if self.paused {
            TimerPhase::Paused
        } else {
            TimerPhase::Running
        }
    }
}

/// A named countdown shared between the ticking task, the message waiter and
/// the command loop.
///
/// All state lives behind one mutex per timer. The transition to zero and
/// the firing of the completion signal happen while that lock is held, so a
/// `status()` reader never sees `remaining == 0` with the signal unset.
#[derive(Debug)]
pub struct CountdownTimer {
    name: String,
    inner: Mutex<TimerInner>,
    completion: Arc<CompletionSignal>,
}

impl CountdownTimer {
    /// Create a running timer. The duration must be positive.
    pub fn new(name: impl Into<String>, duration: u64) -> Result<Self, TimerError> {
        if duration == 0 {
            return Err(TimerError::InvalidDuration(duration));
        }

        Ok(Self {
            name: name.into(),
            inner: Mutex::new(TimerInner {
                duration,
                remaining: duration,
                paused: false,
                complete: false,
            }),
            completion: Arc::new(CompletionSignal::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the completion signal, for message waiters
    pub fn completion(&self) -> Arc<CompletionSignal> {
        Arc::clone(&self.completion)
    }

    // A panic while holding the lock cannot leave the fields half-written,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, TimerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pause the countdown. No-op when already paused or complete.
    pub fn pause(&self) {
        let mut inner = self.lock();
        if !inner.complete {
            inner.paused = true;
            debug!("Timer '{}' paused at {}s", self.name, inner.remaining);
        }
    }

    /// Resume the countdown. No-op when already running or complete.
    pub fn resume(&self) {
        let mut inner = self.lock();
        if !inner.complete {
            inner.paused = false;
            debug!("Timer '{}' resumed at {}s", self.name, inner.remaining);
        }
    }

    /// Set both duration and remaining time to `new_duration`.
    ///
    /// The paused flag is kept. Rejected once the timer is complete.
    pub fn adjust_time(&self, new_duration: u64) -> Result<TimerStatus, TimerError> {
        if new_duration == 0 {
            return Err(TimerError::InvalidDuration(new_duration));
        }

        let mut inner = self.lock();
        if inner.complete {
            return Err(TimerError::AlreadyComplete(self.name.clone()));
        }
        inner.duration = new_duration;
        inner.remaining = new_duration;
        debug!("Timer '{}' adjusted to {}s", self.name, new_duration);

        Ok(self.snapshot(&inner))
    }

    /// Take a consistent snapshot of the timer
    pub fn status(&self) -> TimerStatus {
        let inner = self.lock();
        self.snapshot(&inner)
    }

    pub fn is_complete(&self) -> bool {
        self.lock().complete
    }

    /// Advance the countdown by one second.
    ///
    /// Called by the ticking task once per check interval. Fires the
    /// completion signal on the decrement that reaches zero.
    pub fn tick(&self) -> TickOutcome {
        let mut inner = self.lock();
        if inner.complete {
            return TickOutcome::Complete;
        }
        if inner.paused {
            return TickOutcome::Paused;
        }

        inner.remaining = inner.remaining.saturating_sub(1);
        if inner.remaining > 0 {
            return TickOutcome::Decremented(inner.remaining);
        }

        inner.complete = true;
        inner.paused = false;
        self.completion.set();
        TickOutcome::Complete
    }

    fn snapshot(&self, inner: &TimerInner) -> TimerStatus {
        TimerStatus {
            name: self.name.clone(),
            duration: inner.duration,
            remaining: inner.remaining,
            paused: inner.paused,
            phase: inner.phase(),
        }
    }
}
