//! Alert events and monitor lifecycle state.

use serde::{Deserialize, Serialize};

/// Lifecycle state of the monitor engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorState {
    /// Not monitoring. Initial state.
    Stopped,
    /// The poll worker is active.
    Running,
}

impl std::fmt::Display for MonitorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// Events emitted by the monitor engine to its alert sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertEvent {
    /// The watched file grew since the last poll tick.
    NewLogDetected {
        /// Tail excerpt containing the new content.
        excerpt: String,
    },
    /// A classification run for a growth event has started.
    AnalysisStarted,
    /// A chunk of streamed classifier output, in arrival order.
    AnalysisChunk {
        /// The chunk text.
        text: String,
    },
    /// The classifier flagged the latest excerpt as a security risk.
    SecurityAlert,
    /// Periodic liveness alert after prolonged silence.
    Heartbeat,
    /// The monitor lifecycle state changed.
    StatusChanged {
        /// New state.
        state: MonitorState,
    },
    /// A non-fatal or fatal error occurred.
    Error {
        /// Error message.
        message: String,
    },
}

impl AlertEvent {
    /// Create an error event from anything displayable.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::Error {
            message: message.to_string(),
        }
    }

    /// Returns true if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, AlertEvent::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_state_display() {
        assert_eq!(MonitorState::Stopped.to_string(), "stopped");
        assert_eq!(MonitorState::Running.to_string(), "running");
    }

    #[test]
    fn test_event_is_error() {
        let event = AlertEvent::NewLogDetected {
            excerpt: "admin login".to_string(),
        };
        assert!(!event.is_error());

        let event = AlertEvent::error("classifier unreachable");
        assert!(event.is_error());
    }

    #[test]
    fn test_event_serialization() {
        let event = AlertEvent::StatusChanged {
            state: MonitorState::Running,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("status_changed"));
        assert!(json.contains("running"));

        let event = AlertEvent::AnalysisChunk {
            text: "No.".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("analysis_chunk"));
    }
}
