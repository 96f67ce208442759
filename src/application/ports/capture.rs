//! Stream capture port interfaces

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::recording::SessionId;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("FFmpeg not found. Install ffmpeg or point --ffmpeg at the binary")]
    FfmpegNotFound,

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Failed to interrupt capture: {0}")]
    InterruptFailed(String),
}

/// What to capture and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub session_id: SessionId,
    pub source_url: String,
    pub output_path: PathBuf,
}

/// How a capture process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Exited cleanly or after an interrupt; the file is finalized
    Completed,
    /// Exited abnormally
    Failed(String),
}

/// Sent exactly once per launched capture, when its process exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEvent {
    pub session_id: SessionId,
    pub output_path: PathBuf,
    pub outcome: CaptureOutcome,
}

pub type CaptureEventSender = mpsc::UnboundedSender<CaptureEvent>;
pub type CaptureEventReceiver = mpsc::UnboundedReceiver<CaptureEvent>;

/// Control over one running capture
pub trait CaptureHandle: Send + Sync {
    /// Ask the capture to finish and finalize its output
    fn interrupt(&self) -> Result<(), CaptureError>;
}

/// Port for launching stream captures
#[async_trait]
pub trait StreamCapture: Send + Sync {
    type Handle: CaptureHandle;

    /// Launch a capture in the background and return immediately.
    ///
    /// # Arguments
    /// * `request` - Source URL and output file
    /// * `events` - Channel that receives the exit event of this capture
    async fn launch(
        &self,
        request: CaptureRequest,
        events: CaptureEventSender,
    ) -> Result<Self::Handle, CaptureError>;
}
