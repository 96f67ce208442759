//! Weekly recording window

use std::fmt;

use chrono::Weekday;
use chrono_tz::Tz;

use super::TimeOfDay;
use crate::domain::error::ScheduleError;

/// Default weekday for the recording window
pub const DEFAULT_WEEKDAY: Weekday = Weekday::Sat;

/// Default timezone for the recording window
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Which end of the recording window a trigger belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Start,
    Stop,
}

impl TriggerKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single weekly trigger: fires at `time` every `weekday` in `timezone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyTrigger {
    pub kind: TriggerKind,
    pub time: TimeOfDay,
    pub weekday: Weekday,
    pub timezone: Tz,
}

impl WeeklyTrigger {
    /// Cron expression with a leading seconds field (`sec min hour dom month dow`)
    pub fn cron_expression(&self) -> String {
        format!(
            "0 {} {} * * {}",
            self.time.minute(),
            self.time.hour(),
            self.weekday.to_string().to_uppercase()
        )
    }
}

/// Weekly recording window.
///
/// Both triggers are anchored to `weekday`. When `end` is earlier than
/// `start` the window crosses midnight and the stop trigger moves to the
/// following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySchedule {
    start: TimeOfDay,
    end: TimeOfDay,
    weekday: Weekday,
    timezone: Tz,
}

impl WeeklySchedule {
    pub fn new(
        start: TimeOfDay,
        end: TimeOfDay,
        weekday: Weekday,
        timezone: Tz,
    ) -> Result<Self, ScheduleError> {
        if start == end {
            return Err(ScheduleError::EmptyWindow(start.to_string()));
        }
        Ok(Self {
            start,
            end,
            weekday,
            timezone,
        })
    }

    /// Parse a weekday name ("Sat", "saturday", ...)
    pub fn parse_weekday(input: &str) -> Result<Weekday, ScheduleError> {
        input
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ScheduleError::InvalidWeekday(input.to_string()))
    }

    /// Parse an IANA timezone name
    pub fn parse_timezone(input: &str) -> Result<Tz, ScheduleError> {
        input
            .trim()
            .parse::<Tz>()
            .map_err(|_| ScheduleError::InvalidTimezone(input.to_string()))
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Whether the stop trigger lands on the day after the start trigger
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    pub fn start_trigger(&self) -> WeeklyTrigger {
        WeeklyTrigger {
            kind: TriggerKind::Start,
            time: self.start,
            weekday: self.weekday,
            timezone: self.timezone,
        }
    }

    pub fn stop_trigger(&self) -> WeeklyTrigger {
        let weekday = if self.crosses_midnight() {
            self.weekday.succ()
        } else {
            self.weekday
        };
        WeeklyTrigger {
            kind: TriggerKind::Stop,
            time: self.end,
            weekday,
            timezone: self.timezone,
        }
    }

    /// Both triggers, start first
    pub fn triggers(&self) -> [WeeklyTrigger; 2] {
        [self.start_trigger(), self.stop_trigger()]
    }

    /// Human readable summary used in the startup banner
    pub fn describe(&self) -> String {
        format!(
            "on {}s from {} to {} ({})",
            weekday_name(self.weekday),
            self.start,
            self.end,
            self.timezone.name()
        )
    }
}

/// Full English name of a weekday
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn new_york() -> Tz {
        WeeklySchedule::parse_timezone(DEFAULT_TIMEZONE).unwrap()
    }

    #[test]
    fn start_and_stop_share_the_weekday() {
        let schedule =
            WeeklySchedule::new(time("19:00"), time("21:00"), Weekday::Sat, new_york()).unwrap();

        assert_eq!(schedule.start_trigger().cron_expression(), "0 0 19 * * SAT");
        assert_eq!(schedule.stop_trigger().cron_expression(), "0 0 21 * * SAT");
        assert!(!schedule.crosses_midnight());
    }

    #[test]
    fn window_crossing_midnight_stops_next_day() {
        let schedule =
            WeeklySchedule::new(time("23:30"), time("1:15"), Weekday::Sat, new_york()).unwrap();

        assert!(schedule.crosses_midnight());
        assert_eq!(schedule.stop_trigger().weekday, Weekday::Sun);
        assert_eq!(schedule.stop_trigger().cron_expression(), "0 15 1 * * SUN");
    }

    #[test]
    fn empty_window_rejected() {
        let err = WeeklySchedule::new(time("19:00"), time("19:00"), Weekday::Sat, new_york())
            .unwrap_err();
        assert_eq!(err, ScheduleError::EmptyWindow("19:00".to_string()));
    }

    #[test]
    fn triggers_keep_timezone() {
        let tz = WeeklySchedule::parse_timezone("Europe/Berlin").unwrap();
        let schedule = WeeklySchedule::new(time("8:00"), time("9:00"), Weekday::Mon, tz).unwrap();
        for trigger in schedule.triggers() {
            assert_eq!(trigger.timezone, tz);
        }
        assert_eq!(schedule.triggers()[0].kind, TriggerKind::Start);
        assert_eq!(schedule.triggers()[1].kind, TriggerKind::Stop);
    }

    #[test]
    fn parse_weekday_accepts_short_and_long_names() {
        assert_eq!(WeeklySchedule::parse_weekday("Sat").unwrap(), Weekday::Sat);
        assert_eq!(WeeklySchedule::parse_weekday("sunday").unwrap(), Weekday::Sun);
        assert!(WeeklySchedule::parse_weekday("someday").is_err());
    }

    #[test]
    fn parse_timezone_rejects_unknown_names() {
        assert!(WeeklySchedule::parse_timezone("America/New_York").is_ok());
        assert_eq!(
            WeeklySchedule::parse_timezone("Mars/Olympus").unwrap_err(),
            ScheduleError::InvalidTimezone("Mars/Olympus".to_string())
        );
    }

    #[test]
    fn describe_mentions_window() {
        let schedule =
            WeeklySchedule::new(time("19:00"), time("21:00"), Weekday::Sat, new_york()).unwrap();
        assert_eq!(
            schedule.describe(),
            "on Saturdays from 19:00 to 21:00 (America/New_York)"
        );
    }
}
