//! Monitor engine: lifecycle control around the poll worker.

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use deepeye_classifier::Classifier;
use deepeye_models::{AlertEvent, MonitorState};

use crate::config::MonitorConfig;
use crate::error::{MonitorError, Result};
use crate::logfile;
use crate::sink::AlertSink;
use crate::worker::{PollWorker, WatchTarget};

/// Watches a growing log file and classifies appended content.
///
/// Owns at most one poll worker at a time; `start()` while running is
/// rejected and `stop()` while stopped is a no-op. The worker observes
/// cancellation cooperatively, so worst-case shutdown latency is one full
/// iteration (sleep plus any in-flight classification).
pub struct MonitorEngine {
    /// Configuration.
    config: MonitorConfig,
    /// Classification provider.
    classifier: Arc<dyn Classifier>,
    /// Destination for alert events and sound requests.
    sink: Arc<dyn AlertSink>,
    /// Shared running flag, cleared by the worker on exit.
    running: Arc<AtomicBool>,
    /// Handle to the worker task.
    worker_handle: Option<JoinHandle<()>>,
    /// Shutdown signal sender for the current worker.
    shutdown_tx: Option<watch::Sender<bool>>,
}

impl MonitorEngine {
    /// Create an engine in the stopped state.
    pub fn new(
        config: MonitorConfig,
        classifier: Arc<dyn Classifier>,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            config,
            classifier,
            sink,
            running: Arc::new(AtomicBool::new(false)),
            worker_handle: None,
            shutdown_tx: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MonitorState {
        if self.running.load(Ordering::Acquire) {
            MonitorState::Running
        } else {
            MonitorState::Stopped
        }
    }

    /// Whether the poll worker is active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start monitoring.
    ///
    /// Ensures the watched file exists (creating it with a timestamped
    /// header, falling back to alternate locations), snapshots its size,
    /// emits `StatusChanged(Running)`, and spawns the poll worker. Errors
    /// with [`MonitorError::AlreadyRunning`] if a worker is active.
    pub async fn start(&mut self) -> Result<()> {
        if self.running.load(Ordering::Acquire) {
            return Err(MonitorError::AlreadyRunning);
        }
        // A previous worker may still be draining its final events.
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.await;
        }
        self.shutdown_tx = None;

        self.config.tail_window.validate()?;
        let path = logfile::ensure_log_file(&self.config.log_file_path)?;
        let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        info!(path = %path.display(), size, "starting monitor");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        self.running.store(true, Ordering::Release);
        self.sink.emit(AlertEvent::StatusChanged {
            state: MonitorState::Running,
        });

        let worker = PollWorker::new(
            self.config.clone(),
            WatchTarget::new(path, size),
            Arc::clone(&self.classifier),
            Arc::clone(&self.sink),
            Arc::clone(&self.running),
            shutdown_rx,
        );
        self.worker_handle = Some(tokio::spawn(worker.run()));
        self.shutdown_tx = Some(shutdown_tx);

        debug!("monitor started");

        Ok(())
    }

    /// Stop monitoring gracefully. No-op if already stopped.
    ///
    /// Signals the worker and waits for it to finish its current
    /// iteration; the worker emits the final `StatusChanged(Stopped)`.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(shutdown_tx) = self.shutdown_tx.take() else {
            return Ok(());
        };

        info!("stopping monitor");

        // A self-stopped worker has already dropped its receiver.
        let _ = shutdown_tx.send(true);

        if let Some(handle) = self.worker_handle.take() {
            debug!("waiting for poll worker to stop");
            handle
                .await
                .map_err(|e| MonitorError::Shutdown(format!("poll worker panicked: {}", e)))?;
        }

        info!("monitor stopped");

        Ok(())
    }
}

impl Drop for MonitorEngine {
    fn drop(&mut self) {
        // Signal the worker if still running
        if let Some(tx) = &self.shutdown_tx {
            let _ = tx.send(true);
        }
    }
}
