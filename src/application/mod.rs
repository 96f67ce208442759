//! Application layer - Use cases and port interfaces
//!
//! Contains the recording controller and the trait definitions
//! for external system interactions.

pub mod ports;
pub mod recording;

// Re-export use cases
pub use recording::{OverlapPolicy, RecordingController, RecordingError, RecordingSettings};
