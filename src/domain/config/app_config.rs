//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::schedule::DEFAULT_TIMEZONE;

/// Default output directory for recordings
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Default FFmpeg binary, resolved through `PATH`
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub start: Option<String>,
    pub end: Option<String>,
    pub url: Option<String>,
    pub output: Option<String>,
    pub weekday: Option<String>,
    pub timezone: Option<String>,
    pub ffmpeg_path: Option<String>,
    pub on_overlap: Option<String>,
}

impl AppConfig {
    /// Create config with default values.
    /// `start`, `end` and `url` have no default and must be supplied.
    pub fn defaults() -> Self {
        Self {
            start: None,
            end: None,
            url: None,
            output: Some(DEFAULT_OUTPUT_DIR.to_string()),
            weekday: Some("saturday".to_string()),
            timezone: Some(DEFAULT_TIMEZONE.to_string()),
            ffmpeg_path: Some(DEFAULT_FFMPEG_PATH.to_string()),
            on_overlap: Some("reject".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: other.start.or(self.start),
            end: other.end.or(self.end),
            url: other.url.or(self.url),
            output: other.output.or(self.output),
            weekday: other.weekday.or(self.weekday),
            timezone: other.timezone.or(self.timezone),
            ffmpeg_path: other.ffmpeg_path.or(self.ffmpeg_path),
            on_overlap: other.on_overlap.or(self.on_overlap),
        }
    }

    /// Output directory, or the current directory if not set
    pub fn output_or_default(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    /// FFmpeg binary, or `ffmpeg` if not set
    pub fn ffmpeg_path_or_default(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or(DEFAULT_FFMPEG_PATH)
    }
}
