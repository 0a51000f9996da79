//! The fixed deployment manifest
//!
//! Declares every artifact the relay host carries, in apply order, plus the
//! script forwarded to the Android device through `adb`.

use std::path::{Path, PathBuf};

use crate::domain::entities::{ArtifactKind, ArtifactSource, BridgePush, DeployedArtifact};
use crate::domain::value_objects::{FileMode, Privilege};

/// Helper scripts deployed to the login user's home, mode 755
pub const SCRIPTS: [&str; 10] = [
    "relay.sh",
    "imcheck.sh",
    "ipad-watchdog.sh",
    "pixel-watchdog.sh",
    "pixel.sh",
    "pixel-wait.sh",
    "pixel-wait.py",
    "pixel-sms.sh",
    "yt.sh",
    "dashboard.sh",
];

/// Contact list read by the relay scripts
pub const CONTACTS: &str = "contacts.tsv";

/// systemd units installed under `/etc/systemd/system`
pub const UNITS: [&str; 3] = [
    "ipad-watchdog.service",
    "pixel-watchdog.service",
    "watchdog-alert@.service",
];

pub const JOURNALD_DROPIN: &str = "journald-mesh.conf";
pub const LOGROTATE_DROPIN: &str = "logrotate-mesh-relay";

/// Script that also lives on the device at `/data/local/tmp`
pub const DEVICE_SCRIPT: &str = "pixel-sms.sh";
const DEVICE_SCRIPT_DIR: &str = "/data/local/tmp";

pub const WATCHDOG_SCRIPTS: [&str; 2] = ["ipad-watchdog.sh", "pixel-watchdog.sh"];
pub const WATCHDOG_UNITS: [&str; 2] = ["ipad-watchdog.service", "pixel-watchdog.service"];
pub const WATCHDOG_SERVICES: [&str; 2] = ["ipad-watchdog", "pixel-watchdog"];

const UNIT_DIR: &str = "/etc/systemd/system";
const JOURNALD_DEST: &str = "/etc/systemd/journald.conf.d/mesh.conf";
const LOGROTATE_DEST: &str = "/etc/logrotate.d/mesh-relay";

/// journald drop-in: keep the journal in RAM and small
pub fn journald_dropin() -> String {
    "[Journal]\nStorage=volatile\nRuntimeMaxUse=20M\nCompress=yes\n".to_string()
}

/// logrotate drop-in for the relay's `messages.log`
pub fn logrotate_dropin(home: &Path, user: &str) -> String {
    format!(
        "{}/messages.log {{\n    monthly\n    rotate 3\n    compress\n    delaycompress\n    missingok\n    notifempty\n    create 0644 {} {}\n}}\n",
        home.display(),
        user,
        user
    )
}

/// Host-specific values the manifest is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestParams {
    /// Login user's home on the host
    pub home: PathBuf,
    /// Login user (owner of rotated logs)
    pub user: String,
    /// `adb -s` serial for the bridge push
    pub device_serial: Option<String>,
}

impl ManifestParams {
    pub fn new(home: impl Into<PathBuf>, user: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            user: user.into(),
            device_serial: None,
        }
    }

    pub fn with_device_serial(mut self, serial: Option<String>) -> Self {
        self.device_serial = serial;
        self
    }
}

/// Ordered artifact table plus device pushes
#[derive(Debug, Clone)]
pub struct Manifest {
    artifacts: Vec<DeployedArtifact>,
    bridge_pushes: Vec<BridgePush>,
}

impl Manifest {
    pub fn new(artifacts: Vec<DeployedArtifact>, bridge_pushes: Vec<BridgePush>) -> Self {
        Self {
            artifacts,
            bridge_pushes,
        }
    }

    /// The relay host manifest
    pub fn mesh(params: &ManifestParams) -> Self {
        let home = params.home.as_path();
        let mut artifacts = Vec::with_capacity(SCRIPTS.len() + UNITS.len() + 3);

        for script in SCRIPTS {
            artifacts.push(
                DeployedArtifact::new(
                    script,
                    ArtifactSource::File(PathBuf::from(script)),
                    home.join(script),
                    ArtifactKind::Script,
                )
                .with_mode(FileMode::EXECUTABLE),
            );
        }

        artifacts.push(DeployedArtifact::new(
            CONTACTS,
            ArtifactSource::File(PathBuf::from(CONTACTS)),
            home.join(CONTACTS),
            ArtifactKind::Data,
        ));

        for unit in UNITS {
            artifacts.push(
                DeployedArtifact::new(
                    unit,
                    ArtifactSource::File(PathBuf::from(unit)),
                    Path::new(UNIT_DIR).join(unit),
                    ArtifactKind::Unit,
                )
                .with_privilege(Privilege::Elevated),
            );
        }

        artifacts.push(
            DeployedArtifact::new(
                JOURNALD_DROPIN,
                ArtifactSource::Inline(journald_dropin()),
                JOURNALD_DEST,
                ArtifactKind::DaemonConfig,
            )
            .with_privilege(Privilege::Elevated),
        );

        artifacts.push(
            DeployedArtifact::new(
                LOGROTATE_DROPIN,
                ArtifactSource::Inline(logrotate_dropin(home, &params.user)),
                LOGROTATE_DEST,
                ArtifactKind::DaemonConfig,
            )
            .with_privilege(Privilege::Elevated),
        );

        let bridge = BridgePush::new(
            DEVICE_SCRIPT,
            home.join(DEVICE_SCRIPT),
            format!("{}/{}", DEVICE_SCRIPT_DIR, DEVICE_SCRIPT),
        )
        .with_serial(params.device_serial.clone());

        Self::new(artifacts, vec![bridge])
    }

    pub fn artifacts(&self) -> &[DeployedArtifact] {
        &self.artifacts
    }

    pub fn bridge_pushes(&self) -> &[BridgePush] {
        &self.bridge_pushes
    }

    pub fn get(&self, name: &str) -> Option<&DeployedArtifact> {
        self.artifacts.iter().find(|a| a.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
