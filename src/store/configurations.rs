//! Saved countdown configurations

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    document,
    error::{Result, StoreError},
};
use crate::utils::EventLog;

/// A countdown setup the user chose to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    #[serde(default)]
    pub name: String,
    pub duration: u64,
    pub message: String,
}

impl ConfigRecord {
    pub fn new(name: impl Into<String>, duration: u64, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration,
            message: message.into(),
        }
    }
}

/// File-backed ordered list of configuration records
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<ConfigRecord>> {
        let records: Vec<ConfigRecord> = document::read(&self.path)?.unwrap_or_default();
        debug!("Loaded configurations from {}", self.path.display());
        Ok(records)
    }

    /// Load every record, reporting a broken document and treating it as empty
    pub fn load_or_empty(&self, log: &EventLog) -> Vec<ConfigRecord> {
        self.load().unwrap_or_else(|e| {
            println!("Error reading configuration file: {}", e);
            log.record_error(&format!("Error reading configuration file: {}", e));
            Vec::new()
        })
    }

    /// Overwrite the document with `records`
    pub fn save(&self, records: &[ConfigRecord]) -> Result<()> {
        document::write(&self.path, &records)?;
        info!("Saved {} configurations to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Remove the record at 1-based `number` and save the rest
    pub fn remove(&self, number: usize) -> Result<ConfigRecord> {
        let mut records = self.load()?;
        if number == 0 || number > records.len() {
            return Err(StoreError::NoSuchRecord(number));
        }

        let removed = records.remove(number - 1);
        self.save(&records)?;
        Ok(removed)
    }

    /// Delete the whole document
    pub fn delete(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        info!("Deleted configuration file {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("countdown_config.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let record = ConfigRecord::new("A", 10, "done");

        store.save(&[record.clone()]).unwrap();
        assert_eq!(store.load().unwrap(), vec![record]);
    }

    #[test]
    fn writes_four_space_indented_json() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&[ConfigRecord::new("A", 10, "done")]).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.starts_with("[\n    {\n        \"name\": \"A\""));
    }

    #[test]
    fn malformed_file_is_an_error_but_loads_empty_when_reported() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));

        let log_path = dir.path().join("events.log");
        let log = EventLog::open(&log_path).unwrap();
        assert!(store.load_or_empty(&log).is_empty());
        assert!(fs::read_to_string(&log_path)
            .unwrap()
            .contains("ERROR - Error reading configuration file"));
    }

    #[test]
    fn records_without_name_still_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), r#"[{"duration": 5, "message": "hi"}]"#).unwrap();

        assert_eq!(store.load().unwrap(), vec![ConfigRecord::new("", 5, "hi")]);
    }

    #[test]
    fn remove_by_number() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .save(&[ConfigRecord::new("A", 1, "a"), ConfigRecord::new("B", 2, "b")])
            .unwrap();

        assert!(matches!(store.remove(3), Err(StoreError::NoSuchRecord(3))));
        assert_eq!(store.remove(1).unwrap().name, "A");
        assert_eq!(store.load().unwrap(), vec![ConfigRecord::new("B", 2, "b")]);
    }

    #[test]
    fn delete_removes_file_and_reports_missing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&[]).unwrap();

        store.delete().unwrap();
        assert!(!store.path().exists());
        assert!(matches!(store.delete(), Err(StoreError::Io { .. })));
    }
}
