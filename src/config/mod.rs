//! Configuration module
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (MESH_*)
//! 3. `--config <path>`, or `./mesh.toml`, or `<config dir>/mesh/config.toml`
//! 4. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, DeviceConfig, HostConfig, SourceConfig, DEFAULT_DEVICE_ENDPOINT};
