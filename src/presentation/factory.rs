//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{DeployUseCase, WaitUseCase};
use crate::config::Config;
use crate::domain::services::{mesh_rules, Manifest, ManifestParams};
use crate::error::MeshResult;
use crate::infrastructure::{AdbForward, SshHost, UiAutomatorConnector};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<SshHost>;

/// Type alias for the concrete WaitUseCase with all dependencies
pub type ConcreteWaitUseCase = WaitUseCase<UiAutomatorConnector>;

/// Manifest for the configured host user and device
pub fn mesh_manifest(config: &Config) -> Manifest {
    let params = ManifestParams::new(config.host.home(), config.host.user.clone())
        .with_device_serial(config.device.serial.clone());
    Manifest::mesh(&params)
}

/// Create a deploy use case talking to the configured host over SSH
pub fn create_deploy_use_case(config: &Config, dry_run: bool) -> MeshResult<ConcreteDeployUseCase> {
    let host = SshHost::new(config.host.destination.clone()).with_dry_run(dry_run);
    DeployUseCase::new(host, mesh_manifest(config), mesh_rules())
}

/// Create a wait use case for the configured uiautomator2 endpoint
pub fn create_wait_use_case(config: &Config) -> ConcreteWaitUseCase {
    WaitUseCase::new(create_device_connector(config))
}

pub fn create_device_connector(config: &Config) -> UiAutomatorConnector {
    let forward = config
        .device
        .adb_forward
        .then(|| AdbForward::new(config.device.serial.clone()));
    UiAutomatorConnector::new(config.device.endpoint.clone())
        .with_connect_timeout(config.device.connect_timeout())
        .with_adb_forward(forward)
}
