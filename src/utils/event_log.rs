//! Append-only event log

use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::{Mutex, PoisonError},
};

use chrono::Local;
use tracing::warn;

/// Timestamped, append-only text log of user-visible events.
///
/// Opened once at startup and handed to components as `Arc<EventLog>`.
/// Writing never fails the caller: errors are reported on stderr and the
/// operation in progress carries on. The file closes when the last handle
/// is dropped.
#[derive(Debug)]
pub struct EventLog {
    file: Option<Mutex<File>>,
}

impl EventLog {
    /// Open (or create) the log file in append mode
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            file: Some(Mutex::new(file)),
        })
    }

    /// A log that drops every record
    pub fn disabled() -> Self {
        Self { file: None }
    }

    /// Record an informational event
    pub fn record(&self, message: &str) {
        self.write("INFO", message);
    }

    /// Record a failure
    pub fn record_error(&self, message: &str) {
        self.write("ERROR", message);
    }

    fn write(&self, level: &str, message: &str) {
        let Some(file) = &self.file else {
            return;
        };

        let line = format!(
            "{} - {} - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            level,
            message
        );

        let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = file.write_all(line.as_bytes()) {
            warn!("Failed to write event log: {}", e);
            eprintln!("Failed to write to log file: {}", e);
        }
    }
}
