//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg, the job scheduler
//! and the config file.

pub mod capture;
pub mod config;
pub mod scheduler;

// Re-export adapters
pub use capture::FfmpegCapture;
pub use config::XdgConfigStore;
pub use scheduler::build_scheduler;
