//! Configuration types

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::loader::{self, ConfigWarning};
use crate::error::MeshResult;

/// Default uiautomator2 endpoint (after `adb forward`)
pub const DEFAULT_DEVICE_ENDPOINT: &str = "http://127.0.0.1:9008";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub device: DeviceConfig,
}

/// The relay host reached over SSH
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// SSH destination (user@host or an ssh_config alias)
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Login user that owns the deployed scripts
    #[serde(default = "default_user")]
    pub user: String,

    /// Home directory of `user`; `/home/<user>` when unset
    #[serde(default)]
    pub home: Option<PathBuf>,
}

fn default_destination() -> String {
    "pi".to_string()
}

fn default_user() -> String {
    "pi".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            user: default_user(),
            home: None,
        }
    }
}

impl HostConfig {
    pub fn home(&self) -> PathBuf {
        self.home
            .clone()
            .unwrap_or_else(|| Path::new("/home").join(&self.user))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Local directory holding the artifact sources
    #[serde(default = "default_source_dir")]
    pub dir: PathBuf,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: default_source_dir(),
        }
    }
}

/// Android device reached through uiautomator2
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// adb serial, for hosts with more than one device attached
    #[serde(default)]
    pub serial: Option<String>,

    /// Run `adb forward` before connecting
    #[serde(default = "default_adb_forward")]
    pub adb_forward: bool,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_DEVICE_ENDPOINT.to_string()
}

fn default_adb_forward() -> bool {
    true
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            serial: None,
            adb_forward: default_adb_forward(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl DeviceConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> MeshResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> MeshResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve the config file, then apply `MESH_*` overrides
    pub fn discover(
        explicit: Option<&Path>,
        cwd: &Path,
    ) -> MeshResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(explicit, cwd)
    }

    /// Apply environment variable overrides (MESH_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
