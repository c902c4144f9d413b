//! Session-wide registry of countdown timers

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::{CountdownTimer, RegistryError, TimerStatus};

/// Append-only collection of every timer created in this session.
///
/// Timers are never removed; completed ones stay listed until exit.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: RwLock<Vec<Arc<CountdownTimer>>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timer. Names are unique within the registry.
    pub fn register(&self, timer: Arc<CountdownTimer>) -> Result<(), RegistryError> {
        let mut timers = self.timers.write().unwrap_or_else(PoisonError::into_inner);

        if timers.iter().any(|t| t.name() == timer.name()) {
            return Err(RegistryError::DuplicateName(timer.name().to_string()));
        }

        info!("Registered countdown '{}'", timer.name());
        timers.push(timer);
        Ok(())
    }

    /// Look up a timer by name
    pub fn get(&self, name: &str) -> Option<Arc<CountdownTimer>> {
        self.timers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|t| t.name() == name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Snapshots of every timer in insertion order
    pub fn status_all(&self) -> Vec<TimerStatus> {
        self.timers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|t| t.status())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(name: &str, duration: u64) -> Arc<CountdownTimer> {
        Arc::new(CountdownTimer::new(name, duration).unwrap())
    }

    #[test]
    fn status_all_keeps_insertion_order() {
        let registry = TimerRegistry::new();
        registry.register(timer("tea", 180)).unwrap();
        registry.register(timer("eggs", 420)).unwrap();
        registry.register(timer("bread", 60)).unwrap();

        let names: Vec<_> = registry.status_all().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["tea", "eggs", "bread"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let registry = TimerRegistry::new();
        registry.register(timer("tea", 180)).unwrap();

        assert_eq!(
            registry.register(timer("tea", 5)),
            Err(RegistryError::DuplicateName("tea".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn status_reflects_live_timer_state() {
        let registry = TimerRegistry::new();
        let tea = timer("tea", 3);
        registry.register(Arc::clone(&tea)).unwrap();

        tea.tick();
        tea.pause();

        let status = &registry.status_all()[0];
        assert_eq!(status.remaining, 2);
        assert!(status.paused);
        assert!(registry.get("tea").is_some());
        assert!(!registry.contains("coffee"));
    }

    #[test]
    fn register_while_timers_tick() {
        let registry = Arc::new(TimerRegistry::new());
        let first = timer("first", 10_000);
        registry.register(Arc::clone(&first)).unwrap();

        let ticker = std::thread::spawn(move || while !first.is_complete() {
            first.tick();
        });

        for i in 0..50 {
            registry.register(timer(&format!("t{i}"), 1)).unwrap();
            let _ = registry.status_all();
        }

        ticker.join().unwrap();
        assert_eq!(registry.len(), 51);
    }
}
