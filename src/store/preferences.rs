//! User preferences

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::{document, error::Result};
use crate::utils::{EventLog, TimeFormat};

/// Key holding the preferred remaining-time display format
pub const TIME_FORMAT_KEY: &str = "time_format";

/// Option name to value mapping. Values are kept as arbitrary JSON so keys
/// this program does not know about survive a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(BTreeMap<String, Value>);

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Overlay `other` on top of these preferences
    pub fn merge(&mut self, other: &Preferences) {
        self.0.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Preferred display format, falling back to the default on bad values
    pub fn time_format(&self) -> TimeFormat {
        let Some(value) = self.get(TIME_FORMAT_KEY) else {
            return TimeFormat::default();
        };

        match value.as_str().map(str::parse::<TimeFormat>) {
            Some(Ok(format)) => format,
            Some(Err(e)) => {
                warn!("{}, using {}", e, TimeFormat::default());
                TimeFormat::default()
            }
            None => {
                warn!("Non-string {} value {}, using {}", TIME_FORMAT_KEY, value, TimeFormat::default());
                TimeFormat::default()
            }
        }
    }

    pub fn set_time_format(&mut self, format: TimeFormat) {
        self.set(TIME_FORMAT_KEY, format.as_str());
    }
}

/// File-backed preferences document
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load preferences. A missing file is an empty mapping.
    pub fn load(&self) -> Result<Preferences> {
        Ok(document::read(&self.path)?.unwrap_or_default())
    }

    /// Merge `preferences` over the stored document and write it back.
    ///
    /// An unreadable existing document is reported to the user and the
    /// event log, then replaced. Returns the merged result.
    pub fn save(&self, preferences: &Preferences, log: &EventLog) -> Result<Preferences> {
        let mut merged = self.load().unwrap_or_else(|e| {
            warn!("Replacing unreadable preferences: {}", e);
            println!("Existing preferences could not be read and will be replaced: {}", e);
            log.record_error(&format!("Replacing unreadable preferences file: {}", e));
            Preferences::new()
        });
        merged.merge(preferences);

        document::write(&self.path, &merged)?;
        info!("Saved preferences to {}", self.path.display());
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(dir.path().join("prefs.json"));
        let prefs = store.load().unwrap();
        assert_eq!(prefs, Preferences::new());
        assert_eq!(prefs.time_format(), TimeFormat::MinutesSeconds);
    }

    #[test]
    fn save_merges_over_existing_document() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(dir.path().join("prefs.json"));
        let log = EventLog::disabled();

        let mut first = Preferences::new();
        first.set("theme", "dark");
        first.set_time_format(TimeFormat::Seconds);
        store.save(&first, &log).unwrap();

        let mut second = Preferences::new();
        second.set_time_format(TimeFormat::HoursMinutesSeconds);
        let merged = store.save(&second, &log).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, merged);
        assert_eq!(loaded.get("theme"), Some(&json!("dark")));
        assert_eq!(loaded.time_format(), TimeFormat::HoursMinutesSeconds);
    }

    #[test]
    fn non_string_values_survive_a_merge() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"time_format": "seconds", "volume": 5}"#).unwrap();
        let store = PreferencesStore::new(&path);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.time_format(), TimeFormat::Seconds);

        let mut update = Preferences::new();
        update.set("theme", "dark");
        store.save(&update, &EventLog::disabled()).unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.get(TIME_FORMAT_KEY), Some(&json!("seconds")));
        assert_eq!(saved.get("volume"), Some(&json!(5)));
        assert_eq!(saved.get("theme"), Some(&json!("dark")));
    }

    #[test]
    fn malformed_document_is_reported_then_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let store = PreferencesStore::new(&path);

        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));

        let log_path = dir.path().join("events.log");
        let log = EventLog::open(&log_path).unwrap();
        let mut prefs = Preferences::new();
        prefs.set_time_format(TimeFormat::Seconds);
        store.save(&prefs, &log).unwrap();

        assert_eq!(store.load().unwrap(), prefs);
        assert!(std::fs::read_to_string(&log_path)
            .unwrap()
            .contains("ERROR - Replacing unreadable preferences file"));
    }

    #[test]
    fn unknown_or_non_string_time_format_falls_back_to_default() {
        let mut prefs = Preferences::new();
        prefs.set(TIME_FORMAT_KEY, "fortnights");
        assert_eq!(prefs.time_format(), TimeFormat::MinutesSeconds);

        prefs.set(TIME_FORMAT_KEY, 3);
        assert_eq!(prefs.time_format(), TimeFormat::MinutesSeconds);
    }
}
