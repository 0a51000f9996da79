//! Deploy Use Case
//!
//! Orchestrates one reconciler run:
//! 1. Read every artifact's source (nothing touches the host if one is missing)
//! 2. Materialize each artifact in manifest order, capturing its change flag
//! 3. Push device scripts through the bridge (always, not change-gated)
//! 4. Plan and execute the change cascade
//!
//! Any failure stops the run; there is no partial-success mode and no retry.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{ApplyResult, ArtifactSource, DeployedArtifact};
use crate::domain::ports::{DeployEvent, DeployEventSink, NoopEventSink, RemoteHost};
use crate::domain::services::{CascadeAction, CascadeRules, Manifest};
use crate::domain::value_objects::Privilege;
use crate::error::{MeshError, MeshResult};

use super::options::DeployOptions;
use super::result::DeployResult;

/// Deploy use case, parameterized by the host it talks to
pub struct DeployUseCase<H>
where
    H: RemoteHost,
{
    host: H,
    manifest: Manifest,
    rules: CascadeRules,
}

impl<H> DeployUseCase<H>
where
    H: RemoteHost,
{
    /// Build the use case, rejecting rule tables that don't fit the manifest
    pub fn new(host: H, manifest: Manifest, rules: CascadeRules) -> MeshResult<Self> {
        rules.validate(&manifest)?;
        Ok(Self {
            host,
            manifest,
            rules,
        })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Execute the run silently
    pub fn execute(&self, options: &DeployOptions) -> MeshResult<DeployResult> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the run, reporting progress to `event_sink`
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> MeshResult<DeployResult> {
        let outcome = self.run(options, event_sink.as_ref());
        if let Err(err) = &outcome {
            event_sink.on_event(DeployEvent::Failed {
                error: err.to_string(),
            });
        }
        outcome
    }

    fn run(
        &self,
        options: &DeployOptions,
        event_sink: &dyn DeployEventSink,
    ) -> MeshResult<DeployResult> {
        let contents = self
            .manifest
            .artifacts()
            .iter()
            .map(|artifact| read_source(artifact, &options.source_dir))
            .collect::<MeshResult<Vec<_>>>()?;

        event_sink.on_event(DeployEvent::Started {
            host: self.host.display_name(),
            artifact_count: self.manifest.len(),
            dry_run: options.dry_run,
        });

        let mut result = DeployResult::new();
        result.dry_run = options.dry_run;

        for (index, (artifact, content)) in self
            .manifest
            .artifacts()
            .iter()
            .zip(contents.iter())
            .enumerate()
        {
            let changed = self.apply(artifact, content)?;
            event_sink.on_event(DeployEvent::ArtifactApplied {
                index,
                name: artifact.name().to_string(),
                destination: artifact.destination().to_path_buf(),
                changed,
            });
            result.results.push(ApplyResult::new(artifact, changed));
        }

        if !options.dry_run {
            for push in self.manifest.bridge_pushes() {
                self.host
                    .run(&push.commands(), Privilege::Normal)
                    .map_err(|source| MeshError::BridgePush { source })?;
                event_sink.on_event(DeployEvent::BridgePushed {
                    artifact: push.artifact().to_string(),
                    device_path: push.device_path().to_string(),
                });
                result.bridge_pushes.push(push.artifact().to_string());
            }
        }

        for fired in self.rules.plan(&result.results) {
            event_sink.on_event(DeployEvent::RuleFired {
                rule: fired.rule.clone(),
                triggered_by: fired.triggered_by.clone(),
            });
            for action in &fired.actions {
                if !options.dry_run {
                    self.execute_action(action)?;
                }
                event_sink.on_event(DeployEvent::ActionExecuted {
                    rule: fired.rule.clone(),
                    action: action.describe(),
                });
            }
            result.fired.push(fired);
        }

        event_sink.on_event(DeployEvent::Completed {
            changed_count: result.changed_count(),
            unchanged_count: result.unchanged_count(),
            fired_rules: result.fired_rule_names(),
        });

        Ok(result)
    }

    fn apply(&self, artifact: &DeployedArtifact, content: &[u8]) -> MeshResult<bool> {
        self.host
            .put(
                content,
                artifact.destination(),
                artifact.mode(),
                artifact.privilege(),
            )
            .map_err(|source| MeshError::Transfer {
                artifact: artifact.name().to_string(),
                destination: artifact.destination().to_path_buf(),
                source,
            })
    }

    fn execute_action(&self, action: &CascadeAction) -> MeshResult<()> {
        let outcome = match action {
            CascadeAction::ReloadUnits => self.host.reload_units(),
            CascadeAction::RestartService(name) => self.host.restart_service(name),
            CascadeAction::Shell {
                commands,
                privilege,
            } => self.host.run(commands, *privilege),
        };
        outcome.map_err(|source| MeshError::Action {
            action: action.describe(),
            source,
        })
    }
}

/// Read an artifact's bytes from disk or from its inline text
fn read_source(artifact: &DeployedArtifact, source_dir: &Path) -> MeshResult<Vec<u8>> {
    match artifact.source() {
        ArtifactSource::Inline(text) => Ok(text.as_bytes().to_vec()),
        ArtifactSource::File(rel) => {
            let path = source_dir.join(rel);
            std::fs::read(&path).map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => MeshError::SourceMissing {
                    name: artifact.name().to_string(),
                    path,
                },
                _ => MeshError::Io(err),
            })
        }
    }
}
