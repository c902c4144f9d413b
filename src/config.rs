//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "countdown")]
#[command(about = "Run named countdowns that can be paused, resumed and adjusted")]
#[command(version = "1.0.0")]
pub struct Config {
    /// File holding saved countdown configurations
    #[arg(long, default_value = "countdown_config.json")]
    pub config_file: PathBuf,

    /// File holding user preferences
    #[arg(long, default_value = "countdown_preferences.json")]
    pub preferences_file: PathBuf,

    /// Append-only event log
    #[arg(long, default_value = "countdown_log.txt")]
    pub log_file: PathBuf,

    /// Milliseconds between countdown ticks
    #[arg(long, default_value = "1000", hide = true)]
    pub check_interval_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Interval between ticks of every countdown
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms.max(1))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Diagnostic filter directive for the tracing subscriber
    pub fn log_filter(&self) -> String {
        format!("countdown={}", self.log_level())
    }
}
