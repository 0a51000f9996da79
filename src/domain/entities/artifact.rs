//! DeployedArtifact entity - one row of the deployment manifest
//!
//! An artifact is declared once per run, materialized on the remote host,
//! then queried for its change flag.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{FileMode, Privilege};

/// Where an artifact's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// A file relative to the local source directory
    File(PathBuf),
    /// Generated text (drop-in configs)
    Inline(String),
}

/// Coarse classification used by kind-wide cascade triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Executable helper script in the user's home
    Script,
    /// Plain data file
    Data,
    /// systemd unit file
    Unit,
    /// Drop-in config for a system daemon (journald, logrotate)
    DaemonConfig,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Script => "script",
            ArtifactKind::Data => "data",
            ArtifactKind::Unit => "unit",
            ArtifactKind::DaemonConfig => "daemon_config",
        }
    }
}

/// A file to place at an absolute destination with an explicit mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedArtifact {
    name: String,
    source: ArtifactSource,
    destination: PathBuf,
    mode: FileMode,
    privilege: Privilege,
    kind: ArtifactKind,
}

impl DeployedArtifact {
    pub fn new(
        name: impl Into<String>,
        source: ArtifactSource,
        destination: impl Into<PathBuf>,
        kind: ArtifactKind,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            destination: destination.into(),
            mode: FileMode::READABLE,
            privilege: Privilege::Normal,
            kind,
        }
    }

    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_privilege(mut self, privilege: Privilege) -> Self {
        self.privilege = privilege;
        self
    }

    /// Logical name (also the key cascade triggers refer to)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &ArtifactSource {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }
}
