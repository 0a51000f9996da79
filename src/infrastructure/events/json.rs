//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON object for one event
pub fn event_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            host,
            artifact_count,
            dry_run,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "host": host,
            "artifact_count": artifact_count,
            "dry_run": dry_run,
        }),

        DeployEvent::ArtifactApplied {
            index,
            name,
            destination,
            changed,
        } => serde_json::json!({
            "event": "artifact",
            "command": "deploy",
            "index": index,
            "name": name,
            "destination": destination.display().to_string(),
            "changed": changed,
        }),

        DeployEvent::BridgePushed {
            artifact,
            device_path,
        } => serde_json::json!({
            "event": "bridge_push",
            "command": "deploy",
            "artifact": artifact,
            "device_path": device_path,
        }),

        DeployEvent::RuleFired { rule, triggered_by } => serde_json::json!({
            "event": "rule_fired",
            "command": "deploy",
            "rule": rule,
            "triggered_by": triggered_by,
        }),

        DeployEvent::ActionExecuted { rule, action } => serde_json::json!({
            "event": "action",
            "command": "deploy",
            "rule": rule,
            "action": action,
        }),

        DeployEvent::Failed { error } => serde_json::json!({
            "event": "error",
            "command": "deploy",
            "status": "failed",
            "error": error,
        }),

        DeployEvent::Completed {
            changed_count,
            unchanged_count,
            fired_rules,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": "success",
            "changed": changed_count,
            "unchanged": unchanged_count,
            "fired_rules": fired_rules,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(&event));
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        String::from_utf8(buffer.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_start_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(DeployEvent::Started {
            host: "pi".to_string(),
            artifact_count: 16,
            dry_run: false,
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["artifact_count"], 16);
        assert_eq!(events[0]["dry_run"], false);
    }

    #[test]
    fn json_sink_outputs_artifact_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(DeployEvent::ArtifactApplied {
            index: 3,
            name: "relay.sh".to_string(),
            destination: PathBuf::from("/home/pi/relay.sh"),
            changed: true,
        });

        assert_eq!(
            lines(&buffer)[0],
            serde_json::json!({
                "event": "artifact",
                "command": "deploy",
                "index": 3,
                "name": "relay.sh",
                "destination": "/home/pi/relay.sh",
                "changed": true,
            })
        );
    }

    #[test]
    fn json_sink_writes_one_object_per_line() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(DeployEvent::RuleFired {
            rule: "restart-watchdogs".to_string(),
            triggered_by: vec!["pixel-watchdog.sh".to_string()],
        });
        sink.on_event(DeployEvent::ActionExecuted {
            rule: "restart-watchdogs".to_string(),
            action: "systemctl restart ipad-watchdog".to_string(),
        });
        sink.on_event(DeployEvent::Completed {
            changed_count: 1,
            unchanged_count: 15,
            fired_rules: vec!["restart-watchdogs".to_string()],
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["triggered_by"][0], "pixel-watchdog.sh");
        assert_eq!(events[1]["event"], "action");
        assert_eq!(events[2]["status"], "success");
        assert_eq!(events[2]["changed"], 1);
    }

    #[test]
    fn json_sink_outputs_failure() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(DeployEvent::Failed {
            error: "connection refused".to_string(),
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "error");
        assert_eq!(events[0]["status"], "failed");
    }
}
