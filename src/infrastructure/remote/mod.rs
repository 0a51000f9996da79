//! Remote Host Implementations
//!
//! Implements `RemoteHost` for a machine reachable over SSH.

mod ssh;

pub use ssh::SshHost;
