//! Recording file naming

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

/// Prefix of every recording file
pub const FILE_PREFIX: &str = "radio_show_";

/// Extension of every recording file (the stream is copied, not re-encoded)
pub const FILE_EXTENSION: &str = "mp3";

/// Name of a recording file, derived from the moment the recording started.
///
/// Format: `radio_show_<ISO-8601 UTC, millisecond precision>.mp3`, e.g.
/// `radio_show_2024-01-06T19:00:00.000Z.mp3`. Names sort by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingFileName {
    started_at: DateTime<Utc>,
}

impl RecordingFileName {
    pub fn at(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }

    /// Full path of this file inside `dir`
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.to_string())
    }
}

impl fmt::Display for RecordingFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}",
            FILE_PREFIX,
            self.started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            FILE_EXTENSION
        )
    }
}
