//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;

// Re-export common types
pub use capture::{
    CaptureError, CaptureEvent, CaptureEventReceiver, CaptureEventSender, CaptureHandle,
    CaptureOutcome, CaptureRequest, StreamCapture,
};
pub use config::ConfigStore;
