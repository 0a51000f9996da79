//! Change cascade
//!
//! A small declared table of (trigger set, actions) pairs evaluated once per
//! run over the collected apply results. Rules fire on logical OR of their
//! triggers and are planned in declaration order.

use crate::domain::entities::{ApplyResult, ArtifactKind};
use crate::domain::services::manifest::{
    Manifest, JOURNALD_DROPIN, WATCHDOG_SCRIPTS, WATCHDOG_SERVICES, WATCHDOG_UNITS,
};
use crate::domain::value_objects::Privilege;
use crate::error::{MeshError, MeshResult};

/// What a rule listens to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Any artifact of this kind
    Kind(ArtifactKind),
    /// One artifact by logical name
    Artifact(String),
}

impl Trigger {
    pub fn artifact(name: impl Into<String>) -> Self {
        Trigger::Artifact(name.into())
    }

    fn matches(&self, result: &ApplyResult) -> bool {
        match self {
            Trigger::Kind(kind) => result.kind() == *kind,
            Trigger::Artifact(name) => result.name() == name,
        }
    }
}

/// Follow-up action run on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeAction {
    /// `systemctl daemon-reload`
    ReloadUnits,
    /// `systemctl restart <name>`
    RestartService(String),
    /// Arbitrary shell commands
    Shell {
        commands: Vec<String>,
        privilege: Privilege,
    },
}

impl CascadeAction {
    /// Short description for reports
    pub fn describe(&self) -> String {
        match self {
            CascadeAction::ReloadUnits => "systemctl daemon-reload".to_string(),
            CascadeAction::RestartService(name) => format!("systemctl restart {}", name),
            CascadeAction::Shell { commands, .. } => commands.join(" && "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeRule {
    name: String,
    triggers: Vec<Trigger>,
    actions: Vec<CascadeAction>,
}

impl CascadeRule {
    pub fn new(name: impl Into<String>, triggers: Vec<Trigger>, actions: Vec<CascadeAction>) -> Self {
        Self {
            name: name.into(),
            triggers,
            actions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn actions(&self) -> &[CascadeAction] {
        &self.actions
    }

    fn reloads_units(&self) -> bool {
        self.actions.contains(&CascadeAction::ReloadUnits)
    }

    fn restarts_services(&self) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(a, CascadeAction::RestartService(_)))
    }

    /// Names of changed results that match any trigger
    fn changed_triggers(&self, results: &[ApplyResult]) -> Vec<String> {
        results
            .iter()
            .filter(|r| r.changed() && self.triggers.iter().any(|t| t.matches(r)))
            .map(|r| r.name().to_string())
            .collect()
    }
}

/// A rule that fired in this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredRule {
    pub rule: String,
    /// Changed artifacts that matched the rule's triggers
    pub triggered_by: Vec<String>,
    pub actions: Vec<CascadeAction>,
}

/// Ordered rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeRules {
    rules: Vec<CascadeRule>,
}

impl CascadeRules {
    pub fn new(rules: Vec<CascadeRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CascadeRule] {
        &self.rules
    }

    /// Check the table against a manifest
    ///
    /// Every named trigger must exist in the manifest, and no rule that
    /// restarts services may come before the rule that reloads units.
    pub fn validate(&self, manifest: &Manifest) -> MeshResult<()> {
        for rule in &self.rules {
            for trigger in &rule.triggers {
                if let Trigger::Artifact(name) = trigger {
                    if !manifest.contains(name) {
                        return Err(MeshError::UnknownTrigger {
                            rule: rule.name.clone(),
                            trigger: name.clone(),
                        });
                    }
                }
            }
        }

        if let Some(reload_at) = self.rules.iter().position(CascadeRule::reloads_units) {
            if let Some(early) = self.rules[..reload_at]
                .iter()
                .find(|r| r.restarts_services())
            {
                return Err(MeshError::RuleOrder {
                    rule: early.name.clone(),
                });
            }
            // Within the reload rule itself the reload has to come first too.
            let rule = &self.rules[reload_at];
            let reload_pos = rule
                .actions
                .iter()
                .position(|a| *a == CascadeAction::ReloadUnits)
                .unwrap_or(0);
            if rule.actions[..reload_pos]
                .iter()
                .any(|a| matches!(a, CascadeAction::RestartService(_)))
            {
                return Err(MeshError::RuleOrder {
                    rule: rule.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Decide which rules fire for this run's results
    pub fn plan(&self, results: &[ApplyResult]) -> Vec<FiredRule> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let triggered_by = rule.changed_triggers(results);
                if triggered_by.is_empty() {
                    None
                } else {
                    Some(FiredRule {
                        rule: rule.name.clone(),
                        triggered_by,
                        actions: rule.actions.clone(),
                    })
                }
            })
            .collect()
    }
}

/// The relay host's cascade
///
/// Both watchdogs restart whenever any watchdog script or unit changed, even
/// if only one of them did.
pub fn mesh_rules() -> CascadeRules {
    let watchdog_triggers = WATCHDOG_SCRIPTS
        .iter()
        .chain(WATCHDOG_UNITS.iter())
        .map(|name| Trigger::artifact(*name))
        .collect();

    CascadeRules::new(vec![
        CascadeRule::new(
            "reload-units",
            vec![Trigger::Kind(ArtifactKind::Unit)],
            vec![CascadeAction::ReloadUnits],
        ),
        CascadeRule::new(
            "restart-journald",
            vec![Trigger::artifact(JOURNALD_DROPIN)],
            vec![CascadeAction::Shell {
                commands: vec!["systemctl restart systemd-journald".to_string()],
                privilege: Privilege::Elevated,
            }],
        ),
        CascadeRule::new(
            "restart-watchdogs",
            watchdog_triggers,
            WATCHDOG_SERVICES
                .iter()
                .map(|svc| CascadeAction::RestartService(svc.to_string()))
                .collect(),
        ),
    ])
}
