//! Monitor configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{MonitorError, Result};

/// Default watched file name, also used for fallback locations.
pub const DEFAULT_LOG_FILE: &str = "server_log.txt";

/// Bounds for tail extraction from the watched file.
///
/// At most `max_chars` trailing bytes are read, then the decoded text is
/// truncated to at most `min_chars` characters for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailWindow {
    /// Characters kept from the decoded tail.
    pub min_chars: usize,
    /// Trailing bytes read from the file.
    pub max_chars: usize,
}

impl Default for TailWindow {
    fn default() -> Self {
        Self {
            min_chars: 100,
            max_chars: 200,
        }
    }
}

impl TailWindow {
    /// Creates a new window with the given bounds.
    pub fn new(min_chars: usize, max_chars: usize) -> Self {
        Self {
            min_chars,
            max_chars,
        }
    }

    /// Checks the invariant `0 < min_chars <= max_chars`.
    pub fn validate(&self) -> Result<()> {
        if self.min_chars == 0 || self.min_chars > self.max_chars {
            return Err(MonitorError::InvalidTailWindow {
                min: self.min_chars,
                max: self.max_chars,
            });
        }
        Ok(())
    }
}

/// Configuration for the monitor engine.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// How often to poll the watched file for growth.
    pub check_interval: Duration,
    /// Silence duration after which the heartbeat alert fires.
    pub alert_interval: Duration,
    /// Tail extraction bounds.
    pub tail_window: TailWindow,
    /// Path of the watched file.
    pub log_file_path: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(1),
            alert_interval: Duration::from_secs(1800),
            tail_window: TailWindow::default(),
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl MonitorConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the poll interval.
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// Sets the heartbeat alert interval.
    pub fn with_alert_interval(mut self, interval: Duration) -> Self {
        self.alert_interval = interval;
        self
    }

    /// Sets the tail window.
    pub fn with_tail_window(mut self, window: TailWindow) -> Self {
        self.tail_window = window;
        self
    }

    /// Sets the watched file path.
    pub fn with_log_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();

        assert_eq!(config.check_interval, Duration::from_secs(1));
        assert_eq!(config.alert_interval, Duration::from_secs(1800));
        assert_eq!(config.tail_window, TailWindow::new(100, 200));
        assert_eq!(config.log_file_path, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_config_builder() {
        let config = MonitorConfig::new()
            .with_check_interval(Duration::from_millis(100))
            .with_alert_interval(Duration::from_secs(60))
            .with_tail_window(TailWindow::new(50, 80))
            .with_log_file_path("/var/log/auth.log");

        assert_eq!(config.check_interval, Duration::from_millis(100));
        assert_eq!(config.alert_interval, Duration::from_secs(60));
        assert_eq!(config.tail_window.min_chars, 50);
        assert_eq!(config.log_file_path, PathBuf::from("/var/log/auth.log"));
    }

    #[test]
    fn test_tail_window_validate() {
        assert!(TailWindow::new(100, 200).validate().is_ok());
        assert!(TailWindow::new(200, 200).validate().is_ok());

        let err = TailWindow::new(0, 200).validate();
        assert!(matches!(
            err,
            Err(MonitorError::InvalidTailWindow { min: 0, .. })
        ));

        let err = TailWindow::new(300, 200).validate();
        assert!(matches!(err, Err(MonitorError::InvalidTailWindow { .. })));
    }
}
