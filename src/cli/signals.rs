//! Signal handling for the recorder main loop

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use crate::domain::schedule::TriggerKind;

/// Messages driving the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderSignal {
    /// Weekly start trigger fired
    Start,
    /// Weekly stop trigger fired
    Stop,
    /// Shutdown requested (SIGINT/SIGTERM)
    Shutdown,
}

impl From<TriggerKind> for RecorderSignal {
    fn from(kind: TriggerKind) -> Self {
        match kind {
            TriggerKind::Start => Self::Start,
            TriggerKind::Stop => Self::Stop,
        }
    }
}

/// Recorder signal handler
///
/// Handles OS shutdown signals (SIGINT/SIGTERM) and provides a channel
/// for receiving triggers from other sources (the job scheduler).
pub struct RecorderSignalHandler {
    receiver: mpsc::Receiver<RecorderSignal>,
}

impl RecorderSignalHandler {
    /// Create a handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender that other sources can use
    /// to feed the main loop.
    pub async fn new() -> Result<(Self, mpsc::Sender<RecorderSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            // Every delivery counts: a second Ctrl+C cuts the finalize wait short
            while sigint.recv().await.is_some() {
                eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
                if tx_int.send(RecorderSignal::Shutdown).await.is_err() {
                    break;
                }
            }
        });

        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            while sigterm.recv().await.is_some() {
                eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
                if tx_term.send(RecorderSignal::Shutdown).await.is_err() {
                    break;
                }
            }
        });

        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<RecorderSignal> {
        self.receiver.recv().await
    }
}
