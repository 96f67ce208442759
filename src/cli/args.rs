//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::application::OverlapPolicy;
use crate::domain::config::AppConfig;

/// Radio Recorder - record a live radio stream every week
#[derive(Parser, Debug)]
#[command(name = "radio-recorder")]
#[command(version)]
#[command(about = "Scheduled weekly recording of a live audio stream using FFmpeg")]
#[command(long_about = None)]
pub struct Cli {
    /// Start time of the recording (e.g., 19:00)
    #[arg(short = 's', long, value_name = "HH:MM")]
    pub start: Option<String>,

    /// End time of the recording (e.g., 21:00)
    #[arg(short = 'e', long, value_name = "HH:MM")]
    pub end: Option<String>,

    /// URL of the live audio stream
    #[arg(short = 'u', long, value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Directory for saved recordings [default: current directory]
    #[arg(short = 'o', long, value_name = "DIR", global = true)]
    pub output: Option<String>,

    /// Day of the week to record on [default: saturday]
    #[arg(short = 'w', long, value_name = "DAY")]
    pub weekday: Option<String>,

    /// IANA timezone of the start and end times [default: America/New_York]
    #[arg(short = 'z', long, value_name = "TZ")]
    pub timezone: Option<String>,

    /// FFmpeg binary used for capturing
    #[arg(long = "ffmpeg", value_name = "PATH", env = "FFMPEG_PATH", global = true)]
    pub ffmpeg_path: Option<String>,

    /// What to do when a start fires while still recording [default: reject]
    #[arg(long, value_name = "POLICY")]
    pub on_overlap: Option<OverlapArg>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config values given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            start: self.start.clone(),
            end: self.end.clone(),
            url: self.url.clone(),
            output: self.output.clone(),
            weekday: self.weekday.clone(),
            timezone: self.timezone.clone(),
            ffmpeg_path: self.ffmpeg_path.clone(),
            on_overlap: self.on_overlap.map(|p| OverlapPolicy::from(p).to_string()),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Record the stream right now for a fixed duration
    Record {
        /// Recording length (e.g., 30s, 5m, 1h30m) [default: 1m]
        #[arg(short = 'd', long, value_name = "TIME")]
        duration: Option<String>,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Overlap policy argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OverlapArg {
    Reject,
    Replace,
}

impl From<OverlapArg> for OverlapPolicy {
    fn from(arg: OverlapArg) -> Self {
        match arg {
            OverlapArg::Reject => OverlapPolicy::Reject,
            OverlapArg::Replace => OverlapPolicy::Replace,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "start",
    "end",
    "url",
    "output",
    "weekday",
    "timezone",
    "ffmpeg_path",
    "on_overlap",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
