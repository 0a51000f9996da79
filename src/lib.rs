//! mesh-deploy - deployment and device tooling for a mesh relay host
//!
//! Two pieces share this crate:
//! - a reconciler that materializes a fixed manifest of scripts, units and
//!   drop-ins on one host over SSH, then runs only the reloads and restarts
//!   the changes call for
//! - `pixel-wait`, a probe that waits for a UI element on an Android device
//!   and reports found / timed out / unreachable as its exit status

pub mod application;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod ui;

// Re-exports for convenience
pub use application::{DeployOptions, DeployResult, DeployUseCase, WaitOutcome, WaitQuery, WaitUseCase};
pub use config::Config;
pub use domain::services::{mesh_rules, Manifest, ManifestParams};
pub use error::{MeshError, MeshResult};
