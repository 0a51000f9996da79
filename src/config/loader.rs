//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MeshError, MeshResult};

use super::types::Config;

/// Config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "mesh.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> MeshResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| MeshError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick a config file: explicit path, `./mesh.toml`, user config, or defaults
///
/// An explicit path must exist; the others are optional.
pub fn discover(explicit: Option<&Path>, cwd: &Path) -> MeshResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(MeshError::Config {
                file: path.to_path_buf(),
                message: "config file not found".to_string(),
            });
        }
        let (config, warnings) = load_with_warnings(path)?;
        return Ok((with_env_overrides(config), warnings));
    }

    let project_config = cwd.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        let (config, warnings) = load_with_warnings(&project_config)?;
        return Ok((with_env_overrides(config), warnings));
    }

    if let Some(user_config_dir) = dirs::config_dir() {
        let user_config = user_config_dir.join("mesh/config.toml");
        if user_config.is_file() {
            let (config, warnings) = load_with_warnings(&user_config)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (MESH_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_env_overrides(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    let non_empty = |key: &str| get_env(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = non_empty("MESH_HOST") {
        config.host.destination = host;
    }
    if let Some(user) = non_empty("MESH_USER") {
        config.host.user = user;
    }
    if let Some(home) = non_empty("MESH_HOME") {
        config.host.home = Some(PathBuf::from(home));
    }
    if let Some(dir) = non_empty("MESH_SOURCE_DIR") {
        config.source.dir = PathBuf::from(dir);
    }
    if let Some(endpoint) = non_empty("MESH_DEVICE_ENDPOINT") {
        config.device.endpoint = endpoint;
    }
    if let Some(serial) = non_empty("MESH_ADB_SERIAL") {
        config.device.serial = Some(serial);
    }
    if let Some(val) = non_empty("MESH_ADB_FORWARD") {
        config.device.adb_forward = val.to_lowercase() != "false" && val != "0";
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "host",
        "destination",
        "user",
        "home",
        "source",
        "dir",
        "device",
        "endpoint",
        "serial",
        "adb_forward",
        "connect_timeout_secs",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
