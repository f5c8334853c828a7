//! File-growth monitoring engine with streaming risk classification.
//!
//! This crate provides the monitoring core of Deepeye:
//! - `MonitorEngine` - lifecycle control and the poll worker
//! - `tail::read_tail` - bounded tail extraction from the watched file
//! - `AlertSink` - the event/sound contract consumed by the engine
//! - `MonitorConfig` / `TailWindow` - injected configuration
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use deepeye_classifier::OpenRouterClassifier;
//! use deepeye_monitor::{ChannelSink, MonitorConfig, MonitorEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::new().with_log_file_path("server_log.txt");
//!     let classifier = Arc::new(OpenRouterClassifier::from_env()?);
//!     let sink = Arc::new(ChannelSink::new());
//!
//!     // Subscribe to alert events
//!     let mut events = sink.subscribe();
//!
//!     let mut engine = MonitorEngine::new(config, classifier, sink);
//!     engine.start().await?;
//!
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     tokio::signal::ctrl_c().await?;
//!     engine.stop().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Key Concepts
//!
//! ## MonitorEngine
//!
//! The engine owns at most one poll worker at a time:
//! - `start()` ensures the watched file exists (with fallback locations),
//!   snapshots its size, and spawns the worker
//! - `stop()` cancels cooperatively and waits for the current iteration
//! - a fatal error inside the loop stops the worker on its own
//!
//! ## Poll worker
//!
//! Once per check interval the worker:
//! - probes the watched file size, recreating a deleted file
//! - on growth, reads the tail and streams it through the classifier,
//!   raising `SecurityAlert` plus a sound request on a risk verdict
//! - fires a heartbeat alert after a sustained period without growth
//!
//! ## AlertSink
//!
//! The engine never formats or styles output; it emits typed
//! `AlertEvent` values to an injected sink, which owns its own
//! presentation context.

pub mod config;
pub mod engine;
pub mod error;
pub mod logfile;
pub mod sink;
pub mod tail;

mod worker;

pub use config::{MonitorConfig, TailWindow, DEFAULT_LOG_FILE};
pub use engine::MonitorEngine;
pub use error::{MonitorError, Result};
pub use sink::{AlertSink, ChannelSink, SoundError};

// Re-export the event types consumers match on.
pub use deepeye_models::{AlertEvent, MonitorState};
