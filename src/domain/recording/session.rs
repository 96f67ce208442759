//! Recording session state machine

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Identifier of one capture, unique within a session manager
pub type SessionId = u64;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// The capture currently in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRecording {
    pub id: SessionId,
    pub output_path: PathBuf,
    pub started_at: DateTime<Utc>,
}

/// Tracks the single in-progress capture.
///
/// State machine:
///   IDLE -> RECORDING (begin)
///   RECORDING -> IDLE (end, on stop)
///   RECORDING -> IDLE (finish, when the capture exits on its own)
#[derive(Debug, Default)]
pub struct RecordingSession {
    active: Option<ActiveRecording>,
    last_id: SessionId,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Recording
        } else {
            SessionState::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveRecording> {
        self.active.as_ref()
    }

    /// Transition from IDLE to RECORDING, allocating a fresh id
    pub fn begin(
        &mut self,
        output_path: PathBuf,
        started_at: DateTime<Utc>,
    ) -> Result<&ActiveRecording, InvalidStateTransition> {
        if self.active.is_some() {
            return Err(InvalidStateTransition {
                current_state: SessionState::Recording,
                action: "start recording".to_string(),
            });
        }
        self.last_id += 1;
        Ok(&*self.active.insert(ActiveRecording {
            id: self.last_id,
            output_path,
            started_at,
        }))
    }

    /// Transition from RECORDING to IDLE (explicit stop)
    pub fn end(&mut self) -> Result<ActiveRecording, InvalidStateTransition> {
        self.active.take().ok_or_else(|| InvalidStateTransition {
            current_state: SessionState::Idle,
            action: "stop recording".to_string(),
        })
    }

    /// Transition to IDLE when capture `id` exited by itself.
    /// Returns `None` if `id` is not the active capture.
    pub fn finish(&mut self, id: SessionId) -> Option<ActiveRecording> {
        if self.active.as_ref().is_some_and(|active| active.id == id) {
            self.active.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn begin(session: &mut RecordingSession, name: &str) -> SessionId {
        session
            .begin(PathBuf::from(name), Utc::now())
            .map(|active| active.id)
            .unwrap()
    }

    #[test]
    fn new_session_is_idle() {
        let session = RecordingSession::new();
        assert!(session.is_idle());
        assert!(!session.is_recording());
        assert!(session.active().is_none());
    }

    #[test]
    fn begin_from_idle() {
        let mut session = RecordingSession::new();
        let id = begin(&mut session, "a.mp3");
        assert!(session.is_recording());
        assert_eq!(session.active().unwrap().id, id);
        assert_eq!(session.active().unwrap().output_path, PathBuf::from("a.mp3"));
    }

    #[test]
    fn begin_while_recording_fails() {
        let mut session = RecordingSession::new();
        begin(&mut session, "a.mp3");

        let err = session.begin(PathBuf::from("b.mp3"), Utc::now()).unwrap_err();
        assert_eq!(err.current_state, SessionState::Recording);
        assert!(err.action.contains("start recording"));
        assert_eq!(session.active().unwrap().output_path, PathBuf::from("a.mp3"));
    }

    #[test]
    fn end_returns_active_recording() {
        let mut session = RecordingSession::new();
        let id = begin(&mut session, "a.mp3");

        let ended = session.end().unwrap();
        assert_eq!(ended.id, id);
        assert!(session.is_idle());
    }

    #[test]
    fn end_from_idle_fails() {
        let mut session = RecordingSession::new();
        let err = session.end().unwrap_err();
        assert_eq!(err.current_state, SessionState::Idle);
    }

    #[test]
    fn ids_increase() {
        let mut session = RecordingSession::new();
        let first = begin(&mut session, "a.mp3");
        session.end().unwrap();
        let second = begin(&mut session, "b.mp3");
        assert!(second > first);
    }

    #[test]
    fn finish_ignores_stale_ids() {
        let mut session = RecordingSession::new();
        let first = begin(&mut session, "a.mp3");
        session.end().unwrap();
        let second = begin(&mut session, "b.mp3");

        assert!(session.finish(first).is_none());
        assert!(session.is_recording());

        assert_eq!(session.finish(second).unwrap().id, second);
        assert!(session.is_idle());
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Recording.to_string(), "recording");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: SessionState::Recording,
            action: "start recording".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("start recording"));
        assert!(msg.contains("recording"));
    }
}
