//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the runners for scheduled and immediate recording.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod options;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_record, run_scheduler, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use options::{OptionsError, RecordOptions, SchedulerOptions};
pub use presenter::Presenter;
