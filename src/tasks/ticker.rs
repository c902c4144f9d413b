//! Countdown ticking task

use std::{sync::Arc, time::Duration};

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::{
    state::{CountdownTimer, TickOutcome},
    utils::EventLog,
};

/// Drive a timer to zero, one tick per `check_interval`.
///
/// A paused timer is re-checked every interval rather than woken up, so
/// pause and resume take effect on the next tick boundary. Ends once the
/// timer reports completion.
pub async fn countdown_task(timer: Arc<CountdownTimer>, check_interval: Duration, log: Arc<EventLog>) {
    let status = timer.status();
    info!("Starting countdown task for '{}'", status.name);
    log.record(&format!(
        "Starting countdown for {} ({} seconds).",
        status.name, status.duration
    ));

    // First tick lands one full interval after start
    let mut interval = interval_at(Instant::now() + check_interval, check_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match timer.tick() {
            TickOutcome::Decremented(remaining) => {
                debug!("'{}': {}s remaining", timer.name(), remaining);
            }
            TickOutcome::Paused => {
                debug!("'{}' is paused, checking again in {:?}", timer.name(), check_interval);
            }
            TickOutcome::Complete => break,
        }
    }

    println!("{}: Countdown complete!", timer.name());
    info!("Countdown '{}' complete", timer.name());
    log.record(&format!("Countdown complete for {}.", timer.name()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerPhase;

    const SECOND: Duration = Duration::from_secs(1);

    fn spawn(duration: u64) -> (Arc<CountdownTimer>, tokio::task::JoinHandle<()>) {
        let timer = Arc::new(CountdownTimer::new("test", duration).unwrap());
        let task = tokio::spawn(countdown_task(
            Arc::clone(&timer),
            SECOND,
            Arc::new(EventLog::disabled()),
        ));
        (timer, task)
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_once_per_second() {
        let start = Instant::now();
        let (timer, task) = spawn(3);

        let mut observed = Vec::new();
        for _ in 0..3 {
            observed.push(timer.status().remaining);
            tokio::time::sleep(SECOND).await;
        }

        task.await.unwrap();
        observed.push(timer.status().remaining);

        assert!(observed.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(observed.first(), Some(&3));
        assert_eq!(observed.last(), Some(&0));
        assert_eq!(timer.status().phase, TimerPhase::Complete);
        assert_eq!(start.elapsed(), 3 * SECOND);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_extends_total_time() {
        let start = Instant::now();
        let (timer, task) = spawn(5);

        // Between the second and third tick, remaining is 3
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(timer.status().remaining, 3);
        timer.pause();

        tokio::time::sleep(2 * SECOND).await;
        assert_eq!(timer.status().remaining, 3);
        timer.resume();

        task.await.unwrap();
        assert!(start.elapsed() >= 7 * SECOND);
        assert_eq!(timer.status().remaining, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn adjust_while_running_restarts_from_new_value() {
        let start = Instant::now();
        let (timer, task) = spawn(10);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        timer.adjust_time(2).unwrap();

        task.await.unwrap();
        assert_eq!(start.elapsed(), 3 * SECOND);
        assert!(timer.completion().is_set());
    }
}
