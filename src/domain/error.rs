//! Domain error types

use thiserror::Error;

/// Error when parsing a time-of-day string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid time: \"{input}\". Expected format: HH:MM in 24-hour time (e.g., 19:00, 9:05)")]
pub struct TimeOfDayParseError {
    pub input: String,
}

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>h, <number>m, <number>s or a combination (e.g., 30s, 5m, 1h30m)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when building a weekly schedule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid weekday: \"{0}\". Expected a day name such as Sat or saturday")]
    InvalidWeekday(String),

    #[error("Invalid timezone: \"{0}\". Expected an IANA name such as America/New_York")]
    InvalidTimezone(String),

    #[error("Start and end time are both {0}; the recording window would be empty")]
    EmptyWindow(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
