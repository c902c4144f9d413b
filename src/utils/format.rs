//! Remaining-time display formats

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Preferred way to render remaining seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `MM:SS`, minutes may exceed 59
    #[default]
    #[serde(rename = "mm:ss")]
    MinutesSeconds,
    /// `HH:MM:SS`
    #[serde(rename = "hh:mm:ss")]
    HoursMinutesSeconds,
    /// Plain seconds, e.g. `75s`
    #[serde(rename = "seconds")]
    Seconds,
}

impl TimeFormat {
    pub const ALL: [TimeFormat; 3] = [
        TimeFormat::MinutesSeconds,
        TimeFormat::HoursMinutesSeconds,
        TimeFormat::Seconds,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::MinutesSeconds => "mm:ss",
            TimeFormat::HoursMinutesSeconds => "hh:mm:ss",
            TimeFormat::Seconds => "seconds",
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        TimeFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| format!("Unknown time format '{}'", s))
    }
}

/// Render remaining seconds in the given format
pub fn format_remaining(seconds: u64, format: TimeFormat) -> String {
    match format {
        TimeFormat::MinutesSeconds => format!("{:02}:{:02}", seconds / 60, seconds % 60),
        TimeFormat::HoursMinutesSeconds => format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        ),
        TimeFormat::Seconds => format!("{}s", seconds),
    }
}
