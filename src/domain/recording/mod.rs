//! Recording domain module

mod duration;
mod file_name;
mod session;

pub use duration::Duration;
pub use file_name::{RecordingFileName, FILE_EXTENSION, FILE_PREFIX};
pub use session::{
    ActiveRecording, InvalidStateTransition, RecordingSession, SessionId, SessionState,
};
