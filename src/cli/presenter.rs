//! CLI presenter for output formatting

use std::path::Path;

use colored::*;

/// Presenter for CLI output formatting.
///
/// Status lines go to stderr so stdout stays clean for `config get`/`list`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    pub fn recording_started(&self, path: &Path) {
        eprintln!(
            "{} Recording started and will be saved to {}",
            "●".red(),
            path.display()
        );
    }

    pub fn recording_stopped(&self) {
        self.info("Recording stopped.");
    }

    pub fn recording_saved(&self, path: &Path) {
        self.success(&format!("Recording saved as {}", path.display()));
    }

    pub fn recording_failed(&self, message: &str) {
        self.error(&format!("An error occurred: {}", message));
    }
}
