//! Deploy Event Port
//!
//! Provides an observable interface for reconciler runs.
//! Enables console progress, JSON event streams, and test recording.

use std::path::PathBuf;

/// Event emitted during a deploy run
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Run started
    Started {
        host: String,
        artifact_count: usize,
        dry_run: bool,
    },

    /// An artifact was materialized (or compared, in dry run)
    ArtifactApplied {
        index: usize,
        name: String,
        destination: PathBuf,
        changed: bool,
    },

    /// A file was pushed through the device bridge
    BridgePushed { artifact: String, device_path: String },

    /// A cascade rule matched at least one changed artifact
    RuleFired {
        rule: String,
        triggered_by: Vec<String>,
    },

    /// A cascade action ran (or would run, in dry run)
    ActionExecuted { rule: String, action: String },

    /// The run aborted
    Failed { error: String },

    /// Run completed
    Completed {
        changed_count: usize,
        unchanged_count: usize,
        fired_rules: Vec<String>,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Human-readable lines in the terminal
/// - JsonEventSink: NDJSON event stream for automation
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants detailed events (e.g., unchanged artifacts)
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingEventSink {
        events: Arc<Mutex<Vec<DeployEvent>>>,
    }

    impl DeployEventSink for RecordingEventSink {
        fn on_event(&self, event: DeployEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(DeployEvent::Started {
            host: "pi".to_string(),
            artifact_count: 16,
            dry_run: false,
        });
        sink.on_event(DeployEvent::ArtifactApplied {
            index: 0,
            name: "relay.sh".to_string(),
            destination: PathBuf::from("/home/pi/relay.sh"),
            changed: true,
        });

        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn noop_sink_wants_no_details() {
        assert!(!NoopEventSink.wants_detailed_events());
    }
}
