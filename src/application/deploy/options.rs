//! Deploy Options

use std::path::PathBuf;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Local directory holding the file-backed artifacts
    pub source_dir: PathBuf,
    /// Compare only: no device push, no cascade actions
    pub dry_run: bool,
}

impl DeployOptions {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
