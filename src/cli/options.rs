//! Validated run options built from the merged configuration

use std::path::PathBuf;

use thiserror::Error;

use crate::application::{OverlapPolicy, RecordingSettings};
use crate::domain::config::AppConfig;
use crate::domain::error::{DurationParseError, ScheduleError, TimeOfDayParseError};
use crate::domain::recording::Duration;
use crate::domain::schedule::{TimeOfDay, WeeklySchedule, DEFAULT_TIMEZONE, DEFAULT_WEEKDAY};

/// Errors in the merged configuration; reported as usage errors
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Missing required option --{flag}. Pass it on the command line or run 'radio-recorder config set {key} <value>'")]
    Missing { flag: &'static str, key: &'static str },

    #[error("{0}")]
    Time(#[from] TimeOfDayParseError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("{0}")]
    Duration(#[from] DurationParseError),

    #[error("{0}")]
    Overlap(String),
}

/// Options for the weekly scheduler
#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    pub schedule: WeeklySchedule,
    pub settings: RecordingSettings,
    pub ffmpeg_path: String,
}

impl SchedulerOptions {
    pub fn from_config(config: &AppConfig) -> Result<Self, OptionsError> {
        let start: TimeOfDay = require(&config.start, "start", "start")?.parse()?;
        let end: TimeOfDay = require(&config.end, "end", "end")?.parse()?;

        let weekday = match config.weekday.as_deref() {
            Some(day) => WeeklySchedule::parse_weekday(day)?,
            None => DEFAULT_WEEKDAY,
        };
        let timezone =
            WeeklySchedule::parse_timezone(config.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE))?;

        Ok(Self {
            schedule: WeeklySchedule::new(start, end, weekday, timezone)?,
            settings: recording_settings(config)?,
            ffmpeg_path: config.ffmpeg_path_or_default().to_string(),
        })
    }
}

/// Options for an immediate fixed-length recording
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub duration: Duration,
    pub settings: RecordingSettings,
    pub ffmpeg_path: String,
}

impl RecordOptions {
    pub fn from_config(config: &AppConfig, duration: Option<&str>) -> Result<Self, OptionsError> {
        let duration = match duration {
            Some(d) => d.parse()?,
            None => Duration::default_duration(),
        };

        Ok(Self {
            duration,
            settings: recording_settings(config)?,
            ffmpeg_path: config.ffmpeg_path_or_default().to_string(),
        })
    }
}

fn recording_settings(config: &AppConfig) -> Result<RecordingSettings, OptionsError> {
    let source_url = require(&config.url, "url", "url")?.trim().to_string();
    let overlap = match config.on_overlap.as_deref() {
        Some(policy) => policy.parse::<OverlapPolicy>().map_err(OptionsError::Overlap)?,
        None => OverlapPolicy::default(),
    };

    Ok(RecordingSettings {
        source_url,
        output_dir: PathBuf::from(config.output_or_default()),
        overlap,
    })
}

fn require<'a>(
    value: &'a Option<String>,
    flag: &'static str,
    key: &'static str,
) -> Result<&'a str, OptionsError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(OptionsError::Missing { flag, key })
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn full_config() -> AppConfig {
        AppConfig {
            start: Some("19:00".to_string()),
            end: Some("21:00".to_string()),
            url: Some("http://stream.example/live.mp3".to_string()),
            ..AppConfig::defaults()
        }
    }

    #[test]
    fn scheduler_options_from_full_config() {
        let options = SchedulerOptions::from_config(&full_config()).unwrap();

        assert_eq!(options.schedule.start().to_string(), "19:00");
        assert_eq!(options.schedule.end().to_string(), "21:00");
        assert_eq!(options.schedule.weekday(), Weekday::Sat);
        assert_eq!(options.schedule.timezone().name(), "America/New_York");
        assert_eq!(options.settings.output_dir, PathBuf::from("."));
        assert_eq!(options.settings.overlap, OverlapPolicy::Reject);
        assert_eq!(options.ffmpeg_path, "ffmpeg");
    }

    #[test]
    fn missing_start_is_reported() {
        let config = AppConfig {
            start: None,
            ..full_config()
        };
        let err = SchedulerOptions::from_config(&config).unwrap_err();
        assert!(matches!(err, OptionsError::Missing { flag: "start", .. }));
        assert!(err.to_string().contains("--start"));
    }

    #[test]
    fn blank_url_counts_as_missing() {
        let config = AppConfig {
            url: Some("  ".to_string()),
            ..full_config()
        };
        let err = SchedulerOptions::from_config(&config).unwrap_err();
        assert!(matches!(err, OptionsError::Missing { flag: "url", .. }));
    }

    #[test]
    fn malformed_time_is_reported() {
        let config = AppConfig {
            end: Some("25:00".to_string()),
            ..full_config()
        };
        let err = SchedulerOptions::from_config(&config).unwrap_err();
        assert!(matches!(err, OptionsError::Time(_)));
    }

    #[test]
    fn bad_weekday_and_timezone_are_reported() {
        let config = AppConfig {
            weekday: Some("caturday".to_string()),
            ..full_config()
        };
        assert!(matches!(
            SchedulerOptions::from_config(&config).unwrap_err(),
            OptionsError::Schedule(ScheduleError::InvalidWeekday(_))
        ));

        let config = AppConfig {
            timezone: Some("Nowhere/Special".to_string()),
            ..full_config()
        };
        assert!(matches!(
            SchedulerOptions::from_config(&config).unwrap_err(),
            OptionsError::Schedule(ScheduleError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn bad_overlap_policy_is_reported() {
        let config = AppConfig {
            on_overlap: Some("queue".to_string()),
            ..full_config()
        };
        assert!(matches!(
            SchedulerOptions::from_config(&config).unwrap_err(),
            OptionsError::Overlap(_)
        ));
    }

    #[test]
    fn record_options_need_only_url() {
        let config = AppConfig {
            url: Some("http://stream.example/live.mp3".to_string()),
            ..AppConfig::defaults()
        };

        let options = RecordOptions::from_config(&config, Some("30s")).unwrap();
        assert_eq!(options.duration.as_secs(), 30);

        let options = RecordOptions::from_config(&config, None).unwrap();
        assert_eq!(options.duration, Duration::default_duration());
    }

    #[test]
    fn record_options_reject_bad_duration() {
        let config = AppConfig {
            url: Some("http://stream.example/live.mp3".to_string()),
            ..AppConfig::defaults()
        };
        assert!(matches!(
            RecordOptions::from_config(&config, Some("soon")).unwrap_err(),
            OptionsError::Duration(_)
        ));
    }
}
