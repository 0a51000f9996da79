//! BridgePush - forward a deployed script from the host onto the Android device

use std::path::{Path, PathBuf};

use crate::domain::services::shell_quote;
use crate::domain::value_objects::FileMode;

/// An `adb push` of a file already materialized on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgePush {
    /// Manifest artifact whose host copy gets pushed
    artifact: String,
    /// Path of the host copy
    host_path: PathBuf,
    /// Destination on the device
    device_path: String,
    mode: FileMode,
    /// `adb -s <serial>` target, if more than one device may be attached
    serial: Option<String>,
}

impl BridgePush {
    pub fn new(
        artifact: impl Into<String>,
        host_path: impl Into<PathBuf>,
        device_path: impl Into<String>,
    ) -> Self {
        Self {
            artifact: artifact.into(),
            host_path: host_path.into(),
            device_path: device_path.into(),
            mode: FileMode::EXECUTABLE,
            serial: None,
        }
    }

    pub fn with_serial(mut self, serial: Option<String>) -> Self {
        self.serial = serial;
        self
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn host_path(&self) -> &Path {
        &self.host_path
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Shell commands run on the host to push the file and mark it executable
    ///
    /// The chmod string is parsed twice: once by the host shell, then again by
    /// the device shell that `adb shell` hands it to.
    pub fn commands(&self) -> Vec<String> {
        let adb = match &self.serial {
            Some(serial) => format!("adb -s {}", shell_quote(serial)),
            None => "adb".to_string(),
        };
        let chmod = format!("chmod {} {}", self.mode, shell_quote(&self.device_path));
        let on_device = format!("su -c {}", shell_quote(&chmod));
        vec![
            format!(
                "{} push {} {}",
                adb,
                shell_quote(&self.host_path.to_string_lossy()),
                shell_quote(&self.device_path)
            ),
            format!("{} shell {}", adb, shell_quote(&on_device)),
        ]
    }
}
