//! Test environment builder for isolated CLI runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Variables that would leak the developer's setup into a test run
const MESH_ENV: &[&str] = &[
    "MESH_HOST",
    "MESH_USER",
    "MESH_HOME",
    "MESH_SOURCE_DIR",
    "MESH_DEVICE_ENDPOINT",
    "MESH_ADB_SERIAL",
    "MESH_ADB_FORWARD",
];

/// Result of running one of the binaries
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl TestResult {
    fn from_output(output: Output, elapsed: Duration) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            elapsed,
        }
    }

    /// Non-empty stderr lines
    pub fn stderr_lines(&self) -> Vec<&str> {
        self.stderr.lines().filter(|l| !l.trim().is_empty()).collect()
    }
}

/// Isolated working directory and HOME
pub struct TestEnv {
    pub work_dir: TempDir,
    pub home_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            home_dir: TempDir::new().unwrap(),
        }
    }

    pub fn work_path(&self, relative: &str) -> PathBuf {
        self.work_dir.path().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.work_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn command(&self, bin: &str, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(bin);
        cmd.current_dir(self.work_dir.path())
            .args(args)
            .with_test_home(self.home_dir.path())
            .env("NO_COLOR", "1")
            .env("TERM", "dumb");
        for key in MESH_ENV {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    fn run_bin(&self, bin: &str, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let started = Instant::now();
        let output = self
            .command(bin, args, env_vars)
            .output()
            .expect("failed to execute binary");
        TestResult::from_output(output, started.elapsed())
    }

    /// Run mesh-deploy
    pub fn deploy(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_bin(env!("CARGO_BIN_EXE_mesh-deploy"), args, env_vars)
    }

    /// Run pixel-wait against `endpoint`, already reachable without adb
    pub fn wait(&self, endpoint: &str, args: &[&str]) -> TestResult {
        self.run_bin(
            env!("CARGO_BIN_EXE_pixel-wait"),
            args,
            &[
                ("MESH_DEVICE_ENDPOINT", endpoint),
                ("MESH_ADB_FORWARD", "false"),
            ],
        )
    }
}

/// Point every home/config lookup at `home`.
pub trait TestHomeExt {
    fn with_test_home(&mut self, home: &Path) -> &mut Self;
}

impl TestHomeExt for Command {
    fn with_test_home(&mut self, home: &Path) -> &mut Self {
        self.env("HOME", home)
            .env("USERPROFILE", home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
    }
}
