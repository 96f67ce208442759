//! App runners for scheduled and immediate recording

use std::process::ExitCode;
use std::time::Duration as StdDuration;

use tokio::sync::mpsc;

use crate::application::ports::{
    CaptureEvent, CaptureEventReceiver, CaptureOutcome, ConfigStore, StreamCapture,
};
use crate::application::{RecordingController, RecordingError};
use crate::domain::config::AppConfig;
use crate::domain::recording::{ActiveRecording, SessionId};
use crate::infrastructure::{build_scheduler, FfmpegCapture};

use super::options::{RecordOptions, SchedulerOptions};
use super::presenter::Presenter;
use super::signals::{RecorderSignal, RecorderSignalHandler};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// How long to wait for FFmpeg to finalize a file after an interrupt
const FINALIZE_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Run the weekly scheduler until SIGINT/SIGTERM
pub async fn run_scheduler(options: SchedulerOptions) -> ExitCode {
    let presenter = Presenter::new();

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let controller = RecordingController::new(
        FfmpegCapture::with_binary(&options.ffmpeg_path),
        options.settings.clone(),
        events_tx,
    );

    // Setup signal handler (returns handler + sender for the scheduler jobs)
    let (mut signals, signal_tx) = match RecorderSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut scheduler = match build_scheduler(&options.schedule, signal_tx).await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup scheduler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.success(&format!(
        "Scheduler set up to start and stop recording {}.",
        options.schedule.describe()
    ));
    presenter.info(&format!(
        "Stream: {} | Output: {} | SIGINT: exit",
        options.settings.source_url,
        options.settings.output_dir.display()
    ));

    recorder_loop(&controller, &mut signals, &mut events_rx, &presenter).await;

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!(error = %e, "scheduler: shutdown failed");
    }
    presenter.info("Shutting down...");

    ExitCode::from(EXIT_SUCCESS)
}

/// Handle triggers and capture events until shutdown
async fn recorder_loop<C: StreamCapture>(
    controller: &RecordingController<C>,
    signals: &mut RecorderSignalHandler,
    events: &mut CaptureEventReceiver,
    presenter: &Presenter,
) {
    loop {
        tokio::select! {
            signal = signals.recv() => match signal {
                Some(RecorderSignal::Start) => start_recording(controller, presenter).await,
                Some(RecorderSignal::Stop) => {
                    stop_recording(controller, presenter).await;
                }
                Some(RecorderSignal::Shutdown) | None => {
                    if let Some(active) = stop_recording(controller, presenter).await {
                        wait_for_capture(controller, events, signals, active.id, presenter).await;
                    }
                    return;
                }
            },
            Some(event) = events.recv() => report_event(controller, &event, presenter).await,
        }
    }
}

async fn start_recording<C: StreamCapture>(
    controller: &RecordingController<C>,
    presenter: &Presenter,
) {
    match controller.start().await {
        Ok(active) => presenter.recording_started(&active.output_path),
        Err(RecordingError::SessionAlreadyActive(path)) => presenter.warn(&format!(
            "Start ignored: still recording to {}",
            path.display()
        )),
        Err(e) => presenter.recording_failed(&e.to_string()),
    }
}

async fn stop_recording<C: StreamCapture>(
    controller: &RecordingController<C>,
    presenter: &Presenter,
) -> Option<ActiveRecording> {
    match controller.stop().await {
        Ok(Some(active)) => {
            presenter.recording_stopped();
            Some(active)
        }
        Ok(None) => None,
        Err(e) => {
            presenter.error(&format!("Failed to stop recording: {}", e));
            None
        }
    }
}

async fn report_event<C: StreamCapture>(
    controller: &RecordingController<C>,
    event: &CaptureEvent,
    presenter: &Presenter,
) {
    controller.handle_event(event).await;
    match &event.outcome {
        CaptureOutcome::Completed => presenter.recording_saved(&event.output_path),
        CaptureOutcome::Failed(message) => presenter.recording_failed(message),
    }
}

/// Report events until capture `id` has exited, the timeout passes or
/// another shutdown is requested.
/// Returns the outcome of capture `id` if it arrived in time.
async fn wait_for_capture<C: StreamCapture>(
    controller: &RecordingController<C>,
    events: &mut CaptureEventReceiver,
    signals: &mut RecorderSignalHandler,
    id: SessionId,
    presenter: &Presenter,
) -> Option<CaptureOutcome> {
    let deadline = tokio::time::sleep(FINALIZE_TIMEOUT);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => {
                presenter.warn("Timed out waiting for FFmpeg to finish the recording");
                return None;
            }
            signal = signals.recv() => {
                if matches!(signal, Some(RecorderSignal::Shutdown) | None) {
                    presenter.warn("Not waiting for FFmpeg to finish the recording");
                    return None;
                }
            }
            event = events.recv() => {
                let event = event?;
                report_event(controller, &event, presenter).await;
                if event.session_id == id {
                    return Some(event.outcome);
                }
            }
        }
    }
}

/// Record immediately for a fixed duration
pub async fn run_record(options: RecordOptions) -> ExitCode {
    let presenter = Presenter::new();

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let controller = RecordingController::new(
        FfmpegCapture::with_binary(&options.ffmpeg_path),
        options.settings.clone(),
        events_tx,
    );

    let (mut signals, _signal_tx) = match RecorderSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let active = match controller.start().await {
        Ok(active) => active,
        Err(e) => {
            presenter.recording_failed(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    presenter.recording_started(&active.output_path);
    presenter.info(&format!(
        "Recording for {} (Ctrl+C stops early)",
        options.duration
    ));

    let elapsed = tokio::time::sleep(options.duration.as_std());
    tokio::pin!(elapsed);

    // Some(outcome) if FFmpeg exited before we stopped it
    let early_outcome = loop {
        tokio::select! {
            _ = &mut elapsed => break None,
            signal = signals.recv() => {
                if matches!(signal, Some(RecorderSignal::Shutdown) | None) {
                    break None;
                }
            }
            Some(event) = events_rx.recv() => {
                report_event(&controller, &event, &presenter).await;
                if event.session_id == active.id {
                    break Some(event.outcome);
                }
            }
        }
    };

    let outcome = match early_outcome {
        Some(outcome) => Some(outcome),
        None => {
            stop_recording(&controller, &presenter).await;
            wait_for_capture(&controller, &mut events_rx, &mut signals, active.id, &presenter)
                .await
        }
    };

    match outcome {
        Some(CaptureOutcome::Completed) => ExitCode::from(EXIT_SUCCESS),
        _ => ExitCode::from(EXIT_ERROR),
    }
}

/// Load and merge configuration: defaults < file < CLI (env via clap)
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            Presenter::new().warn(&format!(
                "Ignoring config file {}: {}",
                store.path().display(),
                e
            ));
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}
