//! Countdown - concurrent named countdowns from the command line
//!
//! This is the main entry point for the countdown application.

use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info, warn};

use countdown::{
    cli::{App, Prompter},
    config::Config,
    utils::{shutdown_signal, EventLog},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Diagnostics go to stderr so they stay out of the prompts
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown v1.0.0");
    info!(
        "Configuration: config_file={}, preferences_file={}, log_file={}, interval={:?}",
        config.config_file.display(),
        config.preferences_file.display(),
        config.log_file.display(),
        config.check_interval()
    );

    let log = match EventLog::open(&config.log_file) {
        Ok(log) => Arc::new(log),
        Err(e) => {
            warn!("Failed to open event log {}: {}", config.log_file.display(), e);
            eprintln!("Failed to open log file {}: {}", config.log_file.display(), e);
            Arc::new(EventLog::disabled())
        }
    };

    let prompter = Prompter::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    let mut app = App::new(prompter, &config, Arc::clone(&log));

    tokio::select! {
        result = app.run() => {
            if let Err(e) = result {
                error!("Session error: {:#}", e);
                log.record_error(&format!("An error occurred: {:#}", e));
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            println!("\nExiting program. Thank you!");
            log.record("Program interrupted by signal.");
        }
    }

    info!("Countdown shutdown complete");
    drop(app);
    drop(log);

    // The stdin reader may still be parked in a blocking read, which would
    // keep the runtime from shutting down.
    std::process::exit(0)
}
