//! Time-of-day value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::TimeOfDayParseError;

/// Wall-clock time within a day, minute precision.
/// Validated on creation: hour is 0-23, minute is 0-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a time of day, returning `None` when out of range
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayParseError;

    /// Parse `H:MM` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeOfDayParseError {
            input: s.to_string(),
        };

        let (hour, minute) = s.trim().split_once(':').ok_or_else(err)?;

        let parse_part = |part: &str, max_len: usize| -> Result<u8, TimeOfDayParseError> {
            if part.is_empty()
                || part.len() > max_len
                || !part.chars().all(|c| c.is_ascii_digit())
            {
                return Err(err());
            }
            part.parse().map_err(|_| err())
        };

        let hour = parse_part(hour, 2)?;
        // Minutes are always two digits ("9:05", not "9:5")
        if minute.len() != 2 {
            return Err(err());
        }
        let minute = parse_part(minute, 2)?;

        Self::new(hour, minute).ok_or_else(err)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
