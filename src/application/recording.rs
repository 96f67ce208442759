//! Recording controller use case

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::recording::{
    ActiveRecording, InvalidStateTransition, RecordingFileName, RecordingSession, SessionState,
};

use super::ports::{
    CaptureError, CaptureEvent, CaptureEventSender, CaptureHandle, CaptureRequest, StreamCapture,
};

/// Errors from the recording controller
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("A recording is already in progress: {}", .0.display())]
    SessionAlreadyActive(PathBuf),

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("{0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// What `start` does while a recording is already running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Refuse the new start and keep the running capture
    #[default]
    Reject,
    /// Interrupt the running capture, then start a new one
    Replace,
}

impl OverlapPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "replace" => Ok(Self::Replace),
            _ => Err(format!(
                "Invalid overlap policy: \"{}\". Valid values are: reject, replace",
                s
            )),
        }
    }
}

/// Settings shared by every recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSettings {
    /// Stream to capture
    pub source_url: String,
    /// Directory that receives the recording files
    pub output_dir: PathBuf,
    pub overlap: OverlapPolicy,
}

struct Slot<H> {
    session: RecordingSession,
    handle: Option<H>,
}

/// Owns the recording session and the handle of its capture process.
///
/// The controller is a plain value: the caller decides its lifetime and
/// injects the capture adapter, so it can be driven without real processes.
pub struct RecordingController<C: StreamCapture> {
    capture: C,
    settings: RecordingSettings,
    slot: Mutex<Slot<C::Handle>>,
    events: CaptureEventSender,
}

impl<C: StreamCapture> RecordingController<C> {
    /// Create a controller. Exit events of launched captures go to `events`.
    pub fn new(capture: C, settings: RecordingSettings, events: CaptureEventSender) -> Self {
        Self {
            capture,
            settings,
            slot: Mutex::new(Slot {
                session: RecordingSession::new(),
                handle: None,
            }),
            events,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.slot.lock().await.session.state()
    }

    /// The recording in progress, if any
    pub async fn active(&self) -> Option<ActiveRecording> {
        self.slot.lock().await.session.active().cloned()
    }

    /// Start recording now
    pub async fn start(&self) -> Result<ActiveRecording, RecordingError> {
        self.start_at(Utc::now()).await
    }

    /// Start recording, naming the file after `now`.
    ///
    /// Returns immediately after the capture is launched; its end is
    /// reported later on the event channel.
    pub async fn start_at(&self, now: DateTime<Utc>) -> Result<ActiveRecording, RecordingError> {
        let mut slot = self.slot.lock().await;

        let running = slot.session.active().map(|active| active.output_path.clone());
        if let Some(running) = running {
            match self.settings.overlap {
                OverlapPolicy::Reject => {
                    return Err(RecordingError::SessionAlreadyActive(running));
                }
                OverlapPolicy::Replace => {
                    let replaced = Self::interrupt_active(&mut slot)?;
                    tracing::warn!(
                        session_id = replaced.id,
                        path = %replaced.output_path.display(),
                        "recording: replaced running capture"
                    );
                }
            }
        }

        let output_path = RecordingFileName::at(now).path_in(&self.settings.output_dir);
        let active = slot.session.begin(output_path, now)?.clone();

        let request = CaptureRequest {
            session_id: active.id,
            source_url: self.settings.source_url.clone(),
            output_path: active.output_path.clone(),
        };

        match self.capture.launch(request, self.events.clone()).await {
            Ok(handle) => {
                slot.handle = Some(handle);
                tracing::info!(
                    session_id = active.id,
                    path = %active.output_path.display(),
                    "recording: capture launched"
                );
                Ok(active)
            }
            Err(e) => {
                // Nothing is running, so the session must not stay active
                slot.session.finish(active.id);
                Err(e.into())
            }
        }
    }

    /// Stop the recording in progress.
    ///
    /// Interrupts the capture once and returns the stopped recording.
    /// Without an active recording this does nothing and returns `None`.
    pub async fn stop(&self) -> Result<Option<ActiveRecording>, RecordingError> {
        let mut slot = self.slot.lock().await;
        if slot.session.is_idle() {
            tracing::debug!("recording: stop requested while idle");
            return Ok(None);
        }
        Self::interrupt_active(&mut slot).map(Some)
    }

    /// Apply the exit event of a capture.
    ///
    /// If it belongs to the active recording (the process ended without being
    /// stopped) the session returns to idle and the recording is returned.
    pub async fn handle_event(&self, event: &CaptureEvent) -> Option<ActiveRecording> {
        let mut slot = self.slot.lock().await;
        let finished = slot.session.finish(event.session_id);
        if finished.is_some() {
            slot.handle = None;
            tracing::info!(
                session_id = event.session_id,
                "recording: capture ended before stop"
            );
        }
        finished
    }

    /// Interrupt first: on failure the session keeps the handle so the
    /// process is never left running untracked.
    fn interrupt_active(slot: &mut Slot<C::Handle>) -> Result<ActiveRecording, RecordingError> {
        if let Some(handle) = &slot.handle {
            handle.interrupt()?;
        }
        slot.handle = None;
        Ok(slot.session.end()?)
    }
}
