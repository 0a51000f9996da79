//! Console Event Sink
//!
//! Human-readable progress lines for interactive runs.

use crossterm::style::Stylize;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::ui::{theme, Icon, UiContext};

/// Event sink that prints one line per interesting event
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
    unicode: bool,
    /// Also print unchanged artifacts and bridge pushes
    verbose: bool,
}

impl ConsoleEventSink {
    pub fn stdout(ui: &UiContext) -> Self {
        Self::with_writer(io::stdout(), ui.color, ui.unicode, ui.verbose > 0)
    }

    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        color: bool,
        unicode: bool,
        verbose: bool,
    ) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color,
            unicode,
            verbose,
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.color, self.unicode)
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{}", text.with(theme::colors::DIM))
        } else {
            text.to_string()
        }
    }

    /// Render an event, or `None` if it isn't shown at this verbosity
    fn render(&self, event: &DeployEvent) -> Option<String> {
        match event {
            DeployEvent::Started {
                host,
                artifact_count,
                dry_run,
            } => {
                let suffix = if *dry_run { " (dry run)" } else { "" };
                Some(format!(
                    "{} Deploying {} artifacts to {}{}",
                    self.icon(Icon::Deploy),
                    artifact_count,
                    host,
                    suffix
                ))
            }

            DeployEvent::ArtifactApplied {
                name,
                destination,
                changed: true,
                ..
            } => Some(format!(
                "  {} {} -> {}",
                self.icon(Icon::Changed),
                name,
                destination.display()
            )),

            DeployEvent::ArtifactApplied { name, .. } if self.verbose => Some(format!(
                "  {} {}",
                self.icon(Icon::Unchanged),
                self.dim(&format!("{} (unchanged)", name))
            )),

            DeployEvent::ArtifactApplied { .. } => None,

            DeployEvent::BridgePushed {
                artifact,
                device_path,
            } if self.verbose => Some(format!(
                "  {} {} -> device:{}",
                self.icon(Icon::Remote),
                artifact,
                device_path
            )),

            DeployEvent::BridgePushed { .. } => None,

            DeployEvent::RuleFired { rule, triggered_by } => Some(format!(
                "{} {} ({})",
                self.icon(Icon::Arrow),
                rule,
                triggered_by.join(", ")
            )),

            DeployEvent::ActionExecuted { action, .. } => Some(format!("    {}", action)),

            // Reported by the caller with the full error chain.
            DeployEvent::Failed { .. } => None,

            DeployEvent::Completed {
                changed_count,
                unchanged_count,
                fired_rules,
            } => {
                let rules = match fired_rules.len() {
                    1 => "1 rule fired".to_string(),
                    n => format!("{} rules fired", n),
                };
                Some(format!(
                    "{} {} changed, {} unchanged, {}",
                    self.icon(Icon::Success),
                    changed_count,
                    unchanged_count,
                    rules
                ))
            }
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        if let Some(line) = self.render(&event) {
            if let Ok(mut writer) = self.writer.lock() {
                let _ = writeln!(writer, "{}", line);
                let _ = writer.flush();
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose
    }
}
