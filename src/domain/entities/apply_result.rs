//! ApplyResult - the outcome of materializing one artifact

use std::path::PathBuf;

use super::artifact::{ArtifactKind, DeployedArtifact};

/// Change status for one artifact in one run
///
/// Built once right after the artifact is materialized; fields are private so
/// the flag cannot be altered afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    name: String,
    kind: ArtifactKind,
    destination: PathBuf,
    changed: bool,
}

impl ApplyResult {
    pub fn new(artifact: &DeployedArtifact, changed: bool) -> Self {
        Self {
            name: artifact.name().to_string(),
            kind: artifact.kind(),
            destination: artifact.destination().to_path_buf(),
            changed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn destination(&self) -> &PathBuf {
        &self.destination
    }

    pub fn changed(&self) -> bool {
        self.changed
    }
}
