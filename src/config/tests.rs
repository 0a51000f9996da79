//! Tests for the config module

use super::loader::{apply_env_overrides, discover, load_with_warnings};
use super::types::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.host.destination, "pi");
    assert_eq!(config.host.user, "pi");
    assert_eq!(config.host.home(), PathBuf::from("/home/pi"));
    assert_eq!(config.source.dir, PathBuf::from("."));
    assert_eq!(config.device.endpoint, "http://127.0.0.1:9008");
    assert!(config.device.adb_forward);
    assert_eq!(config.device.connect_timeout(), Duration::from_secs(5));
}

#[test]
fn test_home_follows_user() {
    let mut config = Config::default();
    config.host.user = "mesh".to_string();
    assert_eq!(config.host.home(), PathBuf::from("/home/mesh"));

    config.host.home = Some(PathBuf::from("/srv/mesh"));
    assert_eq!(config.host.home(), PathBuf::from("/srv/mesh"));
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[host]
destination = "mesh@relay.local"
user = "mesh"

[source]
dir = "deploy"

[device]
endpoint = "http://127.0.0.1:7912"
serial = "R58N"
adb_forward = true
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.host.destination, "mesh@relay.local");
    assert_eq!(config.host.home(), PathBuf::from("/home/mesh"));
    assert_eq!(config.source.dir, PathBuf::from("deploy"));
    assert_eq!(config.device.serial.as_deref(), Some("R58N"));
    assert!(config.device.adb_forward);
    assert_eq!(config.device.connect_timeout_secs, 5);
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mesh.toml");
    fs::write(&path, "[host]\ndestinaton = \"relay\"\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.host.destination, "pi");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "destinaton");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("destination"));
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mesh.toml");
    fs::write(&path, "[host\n").unwrap();

    let err = load_with_warnings(&path).unwrap_err();
    assert!(matches!(err, crate::error::MeshError::Config { .. }));
}

#[test]
fn test_discover_requires_explicit_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = discover(Some(&missing), dir.path()).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_discover_prefers_project_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("mesh.toml"),
        "[host]\ndestination = \"relay\"\n",
    )
    .unwrap();

    let (config, warnings) = discover(None, dir.path()).unwrap();
    assert!(warnings.is_empty());
    // MESH_HOST in the test environment would win, so only check when unset.
    if std::env::var("MESH_HOST").is_err() {
        assert_eq!(config.host.destination, "relay");
    }
}

#[test]
fn test_env_overrides() {
    let config = apply_env_overrides(
        Config::default(),
        env(&[
            ("MESH_HOST", "relay"),
            ("MESH_USER", "mesh"),
            ("MESH_SOURCE_DIR", "/tmp/src"),
            ("MESH_DEVICE_ENDPOINT", "http://127.0.0.1:7000"),
            ("MESH_ADB_SERIAL", "R58N"),
            ("MESH_ADB_FORWARD", "1"),
        ]),
    );

    assert_eq!(config.host.destination, "relay");
    assert_eq!(config.host.home(), Path::new("/home/mesh"));
    assert_eq!(config.source.dir, PathBuf::from("/tmp/src"));
    assert_eq!(config.device.endpoint, "http://127.0.0.1:7000");
    assert_eq!(config.device.serial.as_deref(), Some("R58N"));
    assert!(config.device.adb_forward);
}

#[test]
fn test_env_overrides_ignore_empty_values() {
    let config = apply_env_overrides(Config::default(), env(&[("MESH_HOST", "  ")]));
    assert_eq!(config.host.destination, "pi");
}

#[test]
fn test_adb_forward_false_values() {
    for val in ["false", "FALSE", "0"] {
        let mut base = Config::default();
        base.device.adb_forward = true;
        let config = apply_env_overrides(base, env(&[("MESH_ADB_FORWARD", val)]));
        assert!(!config.device.adb_forward, "{}", val);
    }
}

#[test]
fn test_device_section_without_forward_keeps_adb_forward_on() {
    let config: Config = toml::from_str("[device]\nserial = \"R58N\"\n").unwrap();
    assert!(config.device.adb_forward);

    let config: Config = toml::from_str("[device]\nadb_forward = false\n").unwrap();
    assert!(!config.device.adb_forward);
}
