//! Interactive application loop

use std::{io::Write, sync::Arc, time::Duration};

use anyhow::Context;
use tokio::io::AsyncBufRead;
use tracing::{debug, error, info};

use super::{
    menu::{CountdownCommand, MenuAction, COMMAND_PROMPT, MENU_PROMPT},
    prompt::{PromptError, Prompter},
};
use crate::{
    config::Config,
    state::{CountdownTimer, TimerPhase, TimerRegistry, TimerStatus},
    store::{ConfigRecord, ConfigStore, Preferences, PreferencesStore},
    tasks::Countdown,
    utils::{format_remaining, EventLog, TimeFormat},
};

/// The interactive session: menu dispatch, running countdowns and the
/// stores they persist to.
pub struct App<R, W> {
    prompter: Prompter<R, W>,
    registry: Arc<TimerRegistry>,
    configs: ConfigStore,
    preferences_store: PreferencesStore,
    preferences: Preferences,
    log: Arc<EventLog>,
    check_interval: Duration,
}

impl<R, W> App<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Build the session from CLI configuration
    pub fn new(prompter: Prompter<R, W>, config: &Config, log: Arc<EventLog>) -> Self {
        Self::with_stores(
            prompter,
            ConfigStore::new(&config.config_file),
            PreferencesStore::new(&config.preferences_file),
            log,
            config.check_interval(),
        )
    }

    pub fn with_stores(
        prompter: Prompter<R, W>,
        configs: ConfigStore,
        preferences_store: PreferencesStore,
        log: Arc<EventLog>,
        check_interval: Duration,
    ) -> Self {
        Self {
            prompter,
            registry: Arc::new(TimerRegistry::new()),
            configs,
            preferences_store,
            preferences: Preferences::new(),
            log,
            check_interval,
        }
    }

    pub fn registry(&self) -> &Arc<TimerRegistry> {
        &self.registry
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Run the menu until the user exits or input closes.
    ///
    /// Errors raised by an action are reported and logged; the loop then
    /// carries on with the next choice.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.load_preferences();

        loop {
            let choice = match self.prompter.read_line(MENU_PROMPT).await {
                Ok(choice) => choice,
                Err(PromptError::Closed) => break,
                Err(e) => return Err(e.into()),
            };

            let action = match choice.parse::<MenuAction>() {
                Ok(MenuAction::Exit) => {
                    self.prompter.say("Exiting program. Thank you!")?;
                    self.log.record("Program exited by user.");
                    return Ok(());
                }
                Ok(action) => action,
                Err(e) => {
                    debug!("{}", e);
                    self.prompter.say("Invalid choice. Please try again.")?;
                    continue;
                }
            };

            if let Err(e) = self.dispatch(action).await {
                if matches!(e.downcast_ref::<PromptError>(), Some(PromptError::Closed)) {
                    break;
                }
                error!("Action {:?} failed: {:#}", action, e);
                self.prompter.say(format!("An error occurred: {:#}", e))?;
                self.log.record_error(&format!("An error occurred: {:#}", e));
            }
        }

        info!("Input closed, ending session");
        self.log.record("Input closed, program exited.");
        Ok(())
    }

    async fn dispatch(&mut self, action: MenuAction) -> anyhow::Result<()> {
        debug!("Dispatching {:?}", action);
        match action {
            MenuAction::SetCountdowns => self.set_countdowns().await,
            MenuAction::ListConfigurations => self.list_configurations(),
            MenuAction::DeleteConfigurations => self.delete_configurations().await,
            MenuAction::CheckStatus => self.check_status(),
            MenuAction::ShowRemainingTime => self.show_remaining_time().await,
            MenuAction::SavePreferences => self.save_preferences().await,
            MenuAction::ReplayConfiguration => self.replay_configuration().await,
            MenuAction::Exit => Ok(()),
        }
    }

    fn load_preferences(&mut self) {
        match self.preferences_store.load() {
            Ok(preferences) => self.preferences = preferences,
            Err(e) => self.report_error(&format!("Error reading preferences file: {}", e)),
        }
    }

    fn report_error(&mut self, message: &str) {
        error!("{}", message);
        if let Err(e) = self.prompter.say(message) {
            error!("Failed to report error to user: {}", e);
        }
        self.log.record_error(message);
    }

    async fn set_countdowns(&mut self) -> anyhow::Result<()> {
        let count = self
            .prompter
            .positive_integer("How many countdowns would you like to set? ")
            .await?;
        let mut configurations = self.configs.load_or_empty(&self.log);

        for i in 0..count {
            self.prompter.say(format!("\nCountdown {}:", i + 1))?;
            let duration = self
                .prompter
                .positive_integer("Enter the countdown duration in seconds: ")
                .await?;
            let name = self.unused_name().await?;

            let mut countdown = self.start_countdown(&name, duration)?;
            let message = self
                .prompter
                .non_empty_string("Enter a message to be displayed after the countdown: ")
                .await?;
            countdown.attach_message(message.clone());

            self.supervise(countdown).await?;

            if self
                .prompter
                .confirm("Would you like to save the current configuration? (yes/no): ")
                .await?
            {
                configurations.push(ConfigRecord::new(name, duration, message));
                match self.configs.save(&configurations) {
                    Ok(()) => self.prompter.say("Configurations saved.")?,
                    Err(e) => self.report_error(&format!("Failed to save configurations: {}", e)),
                }
            }

            if !self
                .prompter
                .yes_no("Would you like to set another countdown? (yes/no): ")
                .await?
            {
                self.prompter.say("Thank you for using the countdown program!")?;
                self.log.record("Countdown setup finished by user.");
                break;
            }
        }

        Ok(())
    }

    async fn unused_name(&mut self) -> Result<String, PromptError> {
        loop {
            let name = self
                .prompter
                .non_empty_string("Enter a name for this countdown: ")
                .await?;
            if !self.registry.contains(&name) {
                return Ok(name);
            }
            self.prompter
                .say(format!("A countdown named '{}' already exists. Please choose another name.", name))?;
        }
    }

    fn start_countdown(&mut self, name: &str, duration: u64) -> anyhow::Result<Countdown> {
        let timer = Arc::new(CountdownTimer::new(name, duration)?);
        self.registry.register(Arc::clone(&timer))?;
        Ok(Countdown::start(timer, self.check_interval, Arc::clone(&self.log)))
    }

    /// Accept commands for a running countdown, then wait for it to finish.
    ///
    /// Both tasks are joined even when input closes mid-countdown.
    async fn supervise(&mut self, countdown: Countdown) -> anyhow::Result<()> {
        let timer = Arc::clone(countdown.timer());
        let commands = self.command_loop(&timer).await;

        // Nobody is left to resume a paused countdown once input is gone
        if commands.is_err() && timer.status().paused {
            timer.resume();
            self.log
                .record(&format!("Countdown resumed for {} after input closed.", timer.name()));
        }

        if !timer.is_complete() {
            self.prompter
                .say(format!("Waiting for '{}' to finish...", timer.name()))?;
        }
        countdown
            .join()
            .await
            .with_context(|| format!("countdown '{}' task failed", timer.name()))?;

        commands?;
        Ok(())
    }

    async fn command_loop(&mut self, timer: &CountdownTimer) -> Result<(), PromptError> {
        loop {
            let command = self.prompter.read_line(COMMAND_PROMPT).await?;

            match command.parse::<CountdownCommand>() {
                Ok(CountdownCommand::Pause) => {
                    timer.pause();
                    self.prompter.say("Countdown paused.")?;
                    self.log.record(&format!("Countdown paused for {}.", timer.name()));
                }
                Ok(CountdownCommand::Resume) => {
                    timer.resume();
                    self.prompter.say("Countdown resumed.")?;
                    self.log.record(&format!("Countdown resumed for {}.", timer.name()));
                }
                Ok(CountdownCommand::Adjust) => {
                    let new_duration = self
                        .prompter
                        .positive_integer("Enter the new countdown duration in seconds: ")
                        .await?;
                    match timer.adjust_time(new_duration) {
                        Ok(_) => {
                            self.prompter.say("Countdown adjusted.")?;
                            self.log.record(&format!(
                                "Countdown adjusted for {} to {} seconds.",
                                timer.name(),
                                new_duration
                            ));
                        }
                        Err(e) => self.prompter.say(format!("Cannot adjust: {}.", e))?,
                    }
                }
                Ok(CountdownCommand::Status) => {
                    let line = describe(&timer.status(), self.preferences.time_format());
                    self.prompter.say(line)?;
                }
                Ok(CountdownCommand::Continue) if timer.status().paused => {
                    self.prompter
                        .say("Countdown is paused. Resume it before continuing.")?;
                }
                Ok(CountdownCommand::Continue) => return Ok(()),
                Err(_) => self.prompter.say(
                    "Invalid input. Please type 'pause', 'resume', 'adjust', 'status', or 'continue'.",
                )?,
            }
        }
    }

    fn list_configurations(&mut self) -> anyhow::Result<()> {
        let configurations = self.configs.load_or_empty(&self.log);
        if configurations.is_empty() {
            self.prompter.say("No configurations found.")?;
            return Ok(());
        }

        for (idx, cfg) in configurations.iter().enumerate() {
            self.prompter.say(format!(
                "Config {}: Name: {}, Duration: {} seconds, Message: {}",
                idx + 1,
                cfg.name,
                cfg.duration,
                cfg.message
            ))?;
        }
        Ok(())
    }

    async fn delete_configurations(&mut self) -> anyhow::Result<()> {
        let scope = self
            .prompter
            .read_line("Delete all configurations or a single one? (all/single): ")
            .await?
            .to_lowercase();

        match scope.as_str() {
            "all" => {
                if self
                    .prompter
                    .confirm("Are you sure you want to delete the configuration file? This action cannot be undone. (yes/no): ")
                    .await?
                {
                    match self.configs.delete() {
                        Ok(()) => self.prompter.say("Configuration file deleted.")?,
                        Err(e) => self.report_error(&format!("Failed to delete configuration file: {}", e)),
                    }
                }
            }
            "single" => {
                self.list_configurations()?;
                let number = self
                    .prompter
                    .positive_integer("Enter the configuration number to delete: ")
                    .await?;
                match self.configs.remove(number as usize) {
                    Ok(removed) => self
                        .prompter
                        .say(format!("Deleted configuration '{}'.", removed.name))?,
                    Err(e) => self.report_error(&format!("Failed to delete configuration: {}", e)),
                }
            }
            _ => self.prompter.say("Invalid input. Please type 'all' or 'single'.")?,
        }
        Ok(())
    }

    fn check_status(&mut self) -> anyhow::Result<()> {
        let statuses = self.registry.status_all();
        if statuses.is_empty() {
            self.prompter.say("No countdowns have been started.")?;
            return Ok(());
        }

        let format = self.preferences.time_format();
        for (idx, status) in statuses.iter().enumerate() {
            self.prompter.say(format!("{}. {}", idx + 1, describe(status, format)))?;
        }
        Ok(())
    }

    async fn show_remaining_time(&mut self) -> anyhow::Result<()> {
        if self.registry.is_empty() {
            self.prompter.say("No countdowns have been started.")?;
            return Ok(());
        }

        let name = self
            .prompter
            .non_empty_string("Enter the name of the countdown: ")
            .await?;
        match self.registry.get(&name) {
            Some(timer) => {
                let remaining = format_remaining(timer.status().remaining, self.preferences.time_format());
                self.prompter.say(format!("{}: {} remaining", name, remaining))?;
            }
            None => self.prompter.say(format!("No countdown named '{}'.", name))?,
        }
        Ok(())
    }

    async fn save_preferences(&mut self) -> anyhow::Result<()> {
        let options: Vec<_> = TimeFormat::ALL.iter().map(TimeFormat::as_str).collect();
        let prompt = format!("Preferred time display format ({}): ", options.join("/"));

        let format = loop {
            match self.prompter.read_line(&prompt).await?.parse::<TimeFormat>() {
                Ok(format) => break format,
                Err(e) => self.prompter.say(format!("{}. Please try again.", e))?,
            }
        };

        let mut update = Preferences::new();
        update.set_time_format(format);
        match self.preferences_store.save(&update, &self.log) {
            Ok(merged) => {
                self.preferences = merged;
                self.prompter.say("Preferences saved.")?;
                self.log.record(&format!("Preferences saved: time format {}.", format));
            }
            Err(e) => {
                // Keep the choice for this session even though it was not persisted
                self.preferences.merge(&update);
                self.report_error(&format!("Failed to save preferences: {}", e));
            }
        }
        Ok(())
    }

    async fn replay_configuration(&mut self) -> anyhow::Result<()> {
        let configurations = self.configs.load_or_empty(&self.log);
        if configurations.is_empty() {
            self.prompter.say("No configurations found.")?;
            return Ok(());
        }

        self.list_configurations()?;
        let number = self
            .prompter
            .positive_integer("Enter the configuration number to replay: ")
            .await? as usize;
        let Some(record) = configurations.get(number - 1) else {
            self.prompter.say(format!("No saved configuration number {}.", number))?;
            return Ok(());
        };

        let name = self.replay_name(&record.name);
        self.prompter
            .say(format!("Replaying '{}' ({} seconds).", name, record.duration))?;

        let mut countdown = self.start_countdown(&name, record.duration)?;
        countdown.attach_message(record.message.clone());
        self.supervise(countdown).await
    }

    /// Saved name, suffixed until it is free in this session
    fn replay_name(&self, saved: &str) -> String {
        let base = if saved.is_empty() { "countdown" } else { saved };
        if !self.registry.contains(base) {
            return base.to_string();
        }

        (2..)
            .map(|n| format!("{} ({})", base, n))
            .find(|candidate| !self.registry.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

/// One-line summary of a timer snapshot
fn describe(status: &TimerStatus, format: TimeFormat) -> String {
    match status.phase {
        TimerPhase::Complete => format!("{}: complete", status.name),
        TimerPhase::Paused => format!(
            "{}: {} remaining (paused)",
            status.name,
            format_remaining(status.remaining, format)
        ),
        TimerPhase::Running => format!(
            "{}: {} remaining",
            status.name,
            format_remaining(status.remaining, format)
        ),
    }
}
