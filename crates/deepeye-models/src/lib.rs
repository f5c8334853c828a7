//! Core data models for Deepeye.
//!
//! This crate provides the fundamental data types shared across the
//! Deepeye monitoring system: alert events, monitor lifecycle state,
//! and classification verdicts.

pub mod event;
pub mod verdict;

// Re-export main types
pub use event::{AlertEvent, MonitorState};
pub use verdict::{ClassificationResult, Verdict};
