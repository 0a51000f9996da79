//! Remote Host Port
//!
//! The file-transfer, service-manager and shell primitives the reconciler
//! needs from the machine it deploys to. `DeployUseCase` only talks to the
//! host through this trait.

use std::path::Path;

use thiserror::Error;

use crate::domain::value_objects::{FileMode, Privilege};

/// Error from a remote host primitive
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The transport itself could not be started or dropped
    #[error("connection error: {0}")]
    Connection(String),
    /// A remote command exited non-zero
    #[error("command '{command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
    /// The host answered with something we could not interpret
    #[error("unexpected response: {0}")]
    Protocol(String),
}

/// Result type for remote host operations
pub type HostResult<T> = Result<T, HostError>;

/// Operations against a single remote host
///
/// Implementations:
/// - `SshHost` - runs everything through the `ssh` binary
/// - test doubles that keep files in memory
pub trait RemoteHost {
    /// Place `content` at `destination` with `mode`
    ///
    /// Returns whether the call altered the destination's content or mode.
    /// Must be idempotent: the same content and mode a second time returns
    /// `false` and writes nothing.
    fn put(
        &self,
        content: &[u8],
        destination: &Path,
        mode: FileMode,
        privilege: Privilege,
    ) -> HostResult<bool>;

    /// Reload the service manager's unit cache (always elevated)
    fn reload_units(&self) -> HostResult<()>;

    /// Restart a named service (always elevated)
    fn restart_service(&self, name: &str) -> HostResult<()>;

    /// Run shell commands in order, stopping at the first failure
    fn run(&self, commands: &[String], privilege: Privilege) -> HostResult<()>;

    /// Human-readable host name for reporting
    fn display_name(&self) -> String;
}
