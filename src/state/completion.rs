//! One-shot completion broadcast

use tokio::sync::watch;

/// Set-once, multi-waiter signal fired when a countdown reaches zero.
///
/// Backed by a `watch` channel holding a single flag. The sender is owned by
/// the signal itself, so waiters can never observe a closed channel.
#[derive(Debug)]
pub struct CompletionSignal {
    tx: watch::Sender<bool>,
}

impl CompletionSignal {
    /// Create an unset signal
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Fire the signal. Returns `true` only for the call that actually set it.
    pub fn set(&self) -> bool {
        self.tx.send_if_modified(|fired| {
            if *fired {
                false
            } else {
                *fired = true;
                true
            }
        })
    }

    /// Check whether the signal has fired
    pub fn is_set(&self) -> bool {
        *self.tx.borrow()
    }

    /// Suspend until the signal fires. Returns immediately if it already has.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot see a closed channel.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, time::Duration};

    #[test]
    fn set_fires_only_once() {
        let signal = CompletionSignal::new();
        assert!(!signal.is_set());
        assert!(signal.set());
        assert!(!signal.set());
        assert!(signal.is_set());
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_already_set() {
        let signal = CompletionSignal::new();
        signal.set();
        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .expect("wait should not block after set");
    }

    #[tokio::test(start_paused = true)]
    async fn every_waiter_is_released_by_one_set() {
        let signal = Arc::new(CompletionSignal::new());
        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let signal = Arc::clone(&signal);
                tokio::spawn(async move { signal.wait().await })
            })
            .collect();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(waiters.iter().all(|w| !w.is_finished()));

        signal.set();
        for waiter in waiters {
            waiter.await.unwrap();
        }
    }
}
