//! Command handlers for both binaries

pub mod deploy;
pub mod manifest;
pub mod wait;

pub use deploy::cmd_deploy;
pub use manifest::cmd_manifest;
pub use wait::{cmd_wait, parse_wait_args, WaitInvocation};
