//! Deploy Result

use crate::domain::entities::ApplyResult;
use crate::domain::services::FiredRule;

/// Result of a completed deploy run
#[derive(Debug, Clone, Default)]
pub struct DeployResult {
    /// One entry per manifest artifact, in apply order
    pub results: Vec<ApplyResult>,
    /// Artifacts pushed through the device bridge
    pub bridge_pushes: Vec<String>,
    /// Cascade rules that fired, in execution order
    pub fired: Vec<FiredRule>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl DeployResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changed(&self) -> impl Iterator<Item = &ApplyResult> {
        self.results.iter().filter(|r| r.changed())
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.results.len() - self.changed_count()
    }

    pub fn has_changes(&self) -> bool {
        self.changed_count() > 0
    }

    pub fn fired_rule_names(&self) -> Vec<String> {
        self.fired.iter().map(|f| f.rule.clone()).collect()
    }
}
