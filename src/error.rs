//! Error types for mesh-deploy
//!
//! Library errors use `thiserror`; the binaries wrap them in `anyhow` at the top level.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::HostError;

/// Result type alias for mesh-deploy operations
pub type MeshResult<T> = Result<T, MeshError>;

/// Main error type for reconciler operations
#[derive(Error, Debug)]
pub enum MeshError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A file-backed artifact has no local source
    #[error("source for '{name}' not found at {path}")]
    SourceMissing { name: String, path: PathBuf },

    /// An artifact failed to materialize on the host
    #[error("failed to deploy '{artifact}' to {destination}: {source}")]
    Transfer {
        artifact: String,
        destination: PathBuf,
        #[source]
        source: HostError,
    },

    /// The on-device push through the bridge failed
    #[error("failed to push to device: {source}")]
    BridgePush {
        #[source]
        source: HostError,
    },

    /// A cascade action (reload, restart, shell) failed
    #[error("action '{action}' failed: {source}")]
    Action {
        action: String,
        #[source]
        source: HostError,
    },

    /// A cascade rule names an artifact that is not in the manifest
    #[error("rule '{rule}' is triggered by unknown artifact '{trigger}'")]
    UnknownTrigger { rule: String, trigger: String },

    /// A restart rule is declared before the unit reload rule
    #[error("rule '{rule}' restarts services before units are reloaded")]
    RuleOrder { rule: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_source_missing() {
        let err = MeshError::SourceMissing {
            name: "relay.sh".to_string(),
            path: PathBuf::from("./relay.sh"),
        };
        assert_eq!(
            err.to_string(),
            "source for 'relay.sh' not found at ./relay.sh"
        );
    }

    #[test]
    fn test_error_display_transfer_includes_host_error() {
        let err = MeshError::Transfer {
            artifact: "ipad-watchdog.service".to_string(),
            destination: PathBuf::from("/etc/systemd/system/ipad-watchdog.service"),
            source: HostError::CommandFailed {
                command: "put".to_string(),
                stderr: "sudo: a password is required".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("ipad-watchdog.service"));
        assert!(msg.contains("a password is required"));
    }

    #[test]
    fn test_error_display_rule_order() {
        let err = MeshError::RuleOrder {
            rule: "restart-watchdogs".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rule 'restart-watchdogs' restarts services before units are reloaded"
        );
    }
}
