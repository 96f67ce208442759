//! FFmpeg-based stream capture adapter

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};

use crate::application::ports::{
    CaptureError, CaptureEvent, CaptureEventSender, CaptureHandle, CaptureOutcome,
    CaptureRequest, StreamCapture,
};
use crate::domain::config::DEFAULT_FFMPEG_PATH;
use crate::domain::recording::SessionId;

/// Captures a stream by copying its audio into a file with FFmpeg
pub struct FfmpegCapture {
    binary: PathBuf,
}

impl FfmpegCapture {
    /// Use `ffmpeg` from `PATH`
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_FFMPEG_PATH)
    }

    /// Use a specific FFmpeg binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Build FFmpeg args: read the stream, copy audio as-is into the output file
    fn build_ffmpeg_args(source_url: &str, output_path: &Path) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            source_url.to_string(),
            "-vn".to_string(), // Drop cover art or video tracks
            "-c:a".to_string(),
            "copy".to_string(), // No re-encode
            "-y".to_string(),   // Overwrite output
            output_path.to_string_lossy().to_string(),
        ]
    }

    /// Spawn FFmpeg process
    fn spawn_ffmpeg(&self, args: Vec<String>) -> Result<Child, CaptureError> {
        Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CaptureError::FfmpegNotFound
                } else {
                    CaptureError::StartFailed(e.to_string())
                }
            })
    }

    /// Wait for the process to exit and report how it ended
    async fn watch(
        mut child: Child,
        session_id: SessionId,
        output_path: PathBuf,
        pid: SharedPid,
        interrupted: Arc<AtomicBool>,
        events: CaptureEventSender,
    ) {
        // Drain stderr concurrently so FFmpeg never blocks on a full pipe
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(drain_stderr(stderr, session_id)));

        let status = child.wait().await;
        // Reaped: the pid may be reused from here on
        *pid.lock().unwrap_or_else(PoisonError::into_inner) = None;

        let last_line = match stderr_task {
            Some(task) => task.await.ok().flatten(),
            None => None,
        };

        let outcome = classify_exit(status, interrupted.load(Ordering::SeqCst), last_line);
        tracing::debug!(session_id, outcome = ?outcome, "ffmpeg: process exited");

        let event = CaptureEvent {
            session_id,
            output_path,
            outcome,
        };
        if events.send(event).is_err() {
            tracing::warn!(session_id, "ffmpeg: event receiver dropped");
        }
    }
}

impl Default for FfmpegCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Read stderr line by line, returning the last non-empty line
async fn drain_stderr(stderr: ChildStderr, session_id: SessionId) -> Option<String> {
    let mut lines = BufReader::new(stderr).lines();
    let mut last = None;
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if !line.is_empty() {
            tracing::debug!(session_id, "ffmpeg: {}", line);
            last = Some(line.to_string());
        }
    }
    last
}

/// An interrupted capture counts as completed: FFmpeg finalizes the file on
/// SIGINT but may still exit non-zero.
fn classify_exit(
    status: std::io::Result<ExitStatus>,
    interrupted: bool,
    last_stderr_line: Option<String>,
) -> CaptureOutcome {
    match status {
        Ok(status) if status.success() || interrupted => CaptureOutcome::Completed,
        Ok(status) => CaptureOutcome::Failed(
            last_stderr_line.unwrap_or_else(|| format!("FFmpeg exited with {}", status)),
        ),
        Err(e) => CaptureOutcome::Failed(format!("Failed to wait for FFmpeg: {}", e)),
    }
}

#[async_trait]
impl StreamCapture for FfmpegCapture {
    type Handle = FfmpegHandle;

    async fn launch(
        &self,
        request: CaptureRequest,
        events: CaptureEventSender,
    ) -> Result<FfmpegHandle, CaptureError> {
        let args = Self::build_ffmpeg_args(&request.source_url, &request.output_path);
        let child = self.spawn_ffmpeg(args)?;

        let pid: SharedPid = Arc::new(Mutex::new(child.id()));
        let interrupted = Arc::new(AtomicBool::new(false));
        tracing::debug!(
            session_id = request.session_id,
            pid = ?child.id(),
            binary = %self.binary.display(),
            "ffmpeg: spawned"
        );

        tokio::spawn(Self::watch(
            child,
            request.session_id,
            request.output_path,
            Arc::clone(&pid),
            Arc::clone(&interrupted),
            events,
        ));

        Ok(FfmpegHandle { pid, interrupted })
    }
}

/// Pid of a live FFmpeg process; `None` once the watcher has reaped it
type SharedPid = Arc<Mutex<Option<u32>>>;

/// Handle to a running FFmpeg capture
pub struct FfmpegHandle {
    pid: SharedPid,
    interrupted: Arc<AtomicBool>,
}

impl CaptureHandle for FfmpegHandle {
    /// Send SIGINT so FFmpeg finalizes the file and exits
    fn interrupt(&self) -> Result<(), CaptureError> {
        // Held while signalling so the watcher cannot clear the pid mid-kill
        let pid = self.pid.lock().unwrap_or_else(PoisonError::into_inner);
        self.interrupted.store(true, Ordering::SeqCst);
        match *pid {
            Some(pid) => send_interrupt(pid),
            // Already reaped
            None => Ok(()),
        }
    }
}

#[cfg(unix)]
fn send_interrupt(pid: u32) -> Result<(), CaptureError> {
    use nix::errno::Errno;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    let pid = i32::try_from(pid)
        .map_err(|_| CaptureError::InterruptFailed(format!("invalid pid {}", pid)))?;

    match signal::kill(Pid::from_raw(pid), Signal::SIGINT) {
        // Exited between the last event and now
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(CaptureError::InterruptFailed(format!("Signal failed: {}", e))),
    }
}

#[cfg(not(unix))]
fn send_interrupt(_pid: u32) -> Result<(), CaptureError> {
    Err(CaptureError::InterruptFailed(
        "interrupting FFmpeg is only supported on Unix".to_string(),
    ))
}
