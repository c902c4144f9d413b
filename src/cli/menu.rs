//! Menu and countdown command parsing

use std::str::FromStr;

/// Top-level menu prompt
pub const MENU_PROMPT: &str = "Choose an action - [1] Set countdowns, [2] List configurations, \
[3] Delete configurations, [4] Check status, [5] Show remaining time, [6] Save preferences, \
[7] Replay configuration, [8] Exit: ";

/// Prompt for commands while a countdown runs
pub const COMMAND_PROMPT: &str =
    "Would you like to pause, resume, adjust, check status, or continue? (pause/resume/adjust/status/continue): ";

/// Numbered actions of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SetCountdowns,
    ListConfigurations,
    DeleteConfigurations,
    CheckStatus,
    ShowRemainingTime,
    SavePreferences,
    ReplayConfiguration,
    Exit,
}

impl FromStr for MenuAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuAction::SetCountdowns),
            "2" => Ok(MenuAction::ListConfigurations),
            "3" => Ok(MenuAction::DeleteConfigurations),
            "4" => Ok(MenuAction::CheckStatus),
            "5" => Ok(MenuAction::ShowRemainingTime),
            "6" => Ok(MenuAction::SavePreferences),
            "7" => Ok(MenuAction::ReplayConfiguration),
            "8" => Ok(MenuAction::Exit),
            other => Err(format!("Invalid choice '{}'", other)),
        }
    }
}

/// Commands accepted while a countdown is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownCommand {
    Pause,
    Resume,
    Adjust,
    Status,
    Continue,
}

impl FromStr for CountdownCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pause" => Ok(CountdownCommand::Pause),
            "resume" => Ok(CountdownCommand::Resume),
            "adjust" => Ok(CountdownCommand::Adjust),
            "status" => Ok(CountdownCommand::Status),
            "continue" => Ok(CountdownCommand::Continue),
            other => Err(format!("Invalid command '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_numbers() {
        assert_eq!("1".parse::<MenuAction>(), Ok(MenuAction::SetCountdowns));
        assert_eq!(" 8 ".parse::<MenuAction>(), Ok(MenuAction::Exit));
        assert!("9".parse::<MenuAction>().is_err());
        assert!("exit".parse::<MenuAction>().is_err());
    }

    #[test]
    fn parses_countdown_commands_case_insensitively() {
        assert_eq!("Pause".parse::<CountdownCommand>(), Ok(CountdownCommand::Pause));
        assert_eq!("CONTINUE".parse::<CountdownCommand>(), Ok(CountdownCommand::Continue));
        assert!("stop".parse::<CountdownCommand>().is_err());
    }
}
