//! Alert sink contract and the channel-backed implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::broadcast;

use deepeye_models::AlertEvent;

/// Sound playback failure. Never fatal to the monitor.
#[derive(Debug, Error)]
#[error("sound playback failed: {0}")]
pub struct SoundError(pub String);

/// Receives alert events and sound requests from the monitor engine.
///
/// `emit` is fire-and-forget and must not block the engine for more than a
/// short, bounded duration; implementations marshal onto their own
/// presentation context. Sound failures are reported back to the engine
/// through the `Result`, which routes them as non-fatal error events.
pub trait AlertSink: Send + Sync {
    /// Accept an event.
    fn emit(&self, event: AlertEvent);

    /// Request an audible alert.
    fn play_sound(&self) -> Result<(), SoundError>;
}

/// Broadcast-channel sink for headless consumers and tests.
///
/// Events fan out to every subscriber in emission order; sound requests
/// are counted rather than played.
pub struct ChannelSink {
    event_tx: broadcast::Sender<AlertEvent>,
    sound_requests: AtomicU64,
}

impl ChannelSink {
    /// Creates a sink with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a sink with the given channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity);
        Self {
            event_tx,
            sound_requests: AtomicU64::new(0),
        }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.event_tx.subscribe()
    }

    /// Number of sound requests received so far.
    pub fn sound_requests(&self) -> u64 {
        self.sound_requests.load(Ordering::Acquire)
    }
}

impl Default for ChannelSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSink for ChannelSink {
    fn emit(&self, event: AlertEvent) {
        // Ignore send errors (no receivers)
        let _ = self.event_tx.send(event);
    }

    fn play_sound(&self) -> Result<(), SoundError> {
        self.sound_requests.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}
