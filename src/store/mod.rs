//! Persistence module
//!
//! This module contains the file-backed stores for saved countdown
//! configurations and user preferences. Both read and write whole JSON
//! documents.

pub mod configurations;
mod document;
pub mod error;
pub mod preferences;

// Re-export main types
pub use configurations::{ConfigRecord, ConfigStore};
pub use error::StoreError;
pub use preferences::{Preferences, PreferencesStore, TIME_FORMAT_KEY};
