//! Poll worker: growth detection, classification dispatch, heartbeat.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use deepeye_classifier::{ClassificationRequest, Classifier};
use deepeye_models::{AlertEvent, ClassificationResult, MonitorState};

use crate::config::MonitorConfig;
use crate::error::Result;
use crate::logfile;
use crate::sink::AlertSink;
use crate::tail;

/// Mutable per-run state of the watched file. Touched only by the worker.
pub(crate) struct WatchTarget {
    /// Path currently being watched; may move to a fallback on recreation.
    pub(crate) path: PathBuf,
    /// File size observed at the previous tick.
    pub(crate) last_known_size: u64,
    /// When the file last grew.
    pub(crate) last_update: Instant,
    /// When the heartbeat alert last fired.
    pub(crate) last_alert: Instant,
}

impl WatchTarget {
    pub(crate) fn new(path: PathBuf, size: u64) -> Self {
        let now = Instant::now();
        Self {
            path,
            last_known_size: size,
            last_update: now,
            last_alert: now,
        }
    }
}

/// Polls the watched file until shutdown or a fatal error.
pub(crate) struct PollWorker {
    config: MonitorConfig,
    target: WatchTarget,
    classifier: Arc<dyn Classifier>,
    sink: Arc<dyn AlertSink>,
    running: Arc<AtomicBool>,
    shutdown: watch::Receiver<bool>,
}

impl PollWorker {
    pub(crate) fn new(
        config: MonitorConfig,
        target: WatchTarget,
        classifier: Arc<dyn Classifier>,
        sink: Arc<dyn AlertSink>,
        running: Arc<AtomicBool>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            target,
            classifier,
            sink,
            running,
            shutdown,
        }
    }

    /// Run the polling loop until the shutdown signal or a fatal error.
    ///
    /// The worker emits the final `StatusChanged(Stopped)` itself, after
    /// clearing the running flag, so no event ever follows it.
    pub(crate) async fn run(mut self) {
        let mut ticker = interval(self.config.check_interval);
        // A poll that outruns the interval (slow classification) must not
        // be replayed as back-to-back catch-up ticks.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so every
        // iteration sleeps before polling.
        ticker.tick().await;

        let mut shutdown = self.shutdown.clone();

        debug!(
            check_interval_ms = self.config.check_interval.as_millis(),
            path = %self.target.path.display(),
            "starting poll worker"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        warn!(error = %e, "fatal poll error, stopping monitor");
                        self.sink.emit(AlertEvent::error(e));
                        break;
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        debug!("worker received shutdown signal");
                        break;
                    }
                }
            }
        }

        self.running.store(false, Ordering::Release);
        self.sink.emit(AlertEvent::StatusChanged {
            state: MonitorState::Stopped,
        });
        debug!("poll worker stopped");
    }

    /// One poll step: size probe, growth handling, heartbeat.
    ///
    /// Recoverable failures are reported through the sink and swallowed;
    /// an `Err` here is fatal and stops the worker.
    pub(crate) async fn poll_once(&mut self) -> Result<()> {
        let size = match fs::metadata(&self.target.path) {
            Ok(meta) => meta.len(),
            Err(_) => {
                // Deleted mid-run: recreate (possibly at a fallback path)
                // and treat the current size as zero.
                let adopted = logfile::ensure_log_file(&self.config.log_file_path)?;
                self.sink.emit(AlertEvent::error(format!(
                    "watched file missing, recreated at {}",
                    adopted.display()
                )));
                self.target.path = adopted;
                0
            }
        };

        if size > self.target.last_known_size {
            self.handle_growth(size).await;
        } else if size < self.target.last_known_size {
            // Truncation or rotation: re-baseline silently so the next
            // append registers as growth.
            debug!(
                old_size = self.target.last_known_size,
                new_size = size,
                "watched file shrank, adopting new baseline"
            );
            self.target.last_known_size = size;
        }

        let now = Instant::now();
        if now.duration_since(self.target.last_update) >= self.config.alert_interval
            && now.duration_since(self.target.last_alert) >= self.config.alert_interval
        {
            info!("no log update within alert interval");
            self.sink.emit(AlertEvent::Heartbeat);
            self.request_sound();
            self.target.last_alert = now;
        }

        Ok(())
    }

    /// Classify the new tail content and raise alerts on a risk verdict.
    async fn handle_growth(&mut self, size: u64) {
        let excerpt = match tail::read_tail(&self.target.path, &self.config.tail_window) {
            Ok(text) => text,
            Err(e) => {
                // Raced a deletion between the size probe and the read; the
                // next tick recreates the file.
                self.sink
                    .emit(AlertEvent::error(format!("failed to read tail: {}", e)));
                return;
            }
        };

        info!(size, "new log content detected");
        self.sink.emit(AlertEvent::NewLogDetected {
            excerpt: excerpt.clone(),
        });
        self.sink.emit(AlertEvent::AnalysisStarted);

        let request = ClassificationRequest::new(excerpt);
        let chunk_sink = Arc::clone(&self.sink);
        let mut forward = move |chunk: &str| {
            chunk_sink.emit(AlertEvent::AnalysisChunk {
                text: chunk.to_string(),
            });
        };

        let result = match self.classifier.classify(&request, &mut forward).await {
            Ok(text) => ClassificationResult::from_response(text),
            Err(e) => {
                // Default-safe: no alert on a failed run, no retry of the
                // same growth event.
                warn!(error = %e, "classification failed");
                self.sink.emit(AlertEvent::error(e));
                ClassificationResult::unknown(String::new())
            }
        };

        if result.verdict.is_risk() {
            info!("security risk flagged");
            self.sink.emit(AlertEvent::SecurityAlert);
            self.request_sound();
        }

        self.target.last_known_size = size;
        self.target.last_update = Instant::now();
    }

    fn request_sound(&self) {
        if let Err(e) = self.sink.play_sound() {
            warn!(error = %e, "sound playback failed");
            self.sink.emit(AlertEvent::error(e));
        }
    }
}
