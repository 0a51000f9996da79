//! SSH Remote Host
//!
//! Runs every primitive as a small shell script through the `ssh` binary.
//! Elevated operations are wrapped in `sudo -n sh -c`, so the login user needs
//! passwordless sudo for them.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::ports::{HostError, HostResult, RemoteHost};
use crate::domain::services::shell_quote;
use crate::domain::value_objects::{ContentHash, FileMode, Privilege};

/// Suffix of the temp file a write goes through before the final rename
const TMP_SUFFIX: &str = ".mesh-tmp";

/// Exit status `ssh` uses for its own (connection) failures
const SSH_CONNECTION_FAILURE: i32 = 255;

/// What is currently at a destination on the host
#[derive(Debug, Clone, PartialEq, Eq)]
enum RemoteState {
    Absent,
    Present { hash: ContentHash, mode: FileMode },
}

/// What `put` has to do to converge a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PutAction {
    Nothing,
    Chmod,
    Write,
}

impl PutAction {
    fn plan(state: &RemoteState, wanted_hash: &ContentHash, wanted_mode: FileMode) -> Self {
        match state {
            RemoteState::Absent => PutAction::Write,
            RemoteState::Present { hash, .. } if hash != wanted_hash => PutAction::Write,
            RemoteState::Present { mode, .. } if *mode != wanted_mode => PutAction::Chmod,
            RemoteState::Present { .. } => PutAction::Nothing,
        }
    }
}

/// Remote host reached through `ssh <destination>`
#[derive(Debug, Clone)]
pub struct SshHost {
    /// SSH destination (user@host or an ssh_config alias)
    destination: String,
    /// ssh binary to invoke
    program: String,
    /// Compare only, never write or run anything mutating
    dry_run: bool,
}

impl SshHost {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            program: "ssh".to_string(),
            dry_run: false,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    fn quote_path(path: &Path) -> String {
        shell_quote(&path.to_string_lossy())
    }

    /// Wrap a script for the requested privilege tier
    fn wrap(script: &str, privilege: Privilege) -> String {
        if privilege.is_elevated() {
            format!("sudo -n sh -c {}", shell_quote(script))
        } else {
            script.to_string()
        }
    }

    fn state_script(path: &Path) -> String {
        let p = Self::quote_path(path);
        format!(
            "if [ -e {p} ]; then sha256sum {p} | cut -d' ' -f1; stat -c %a {p}; else echo absent; fi",
            p = p
        )
    }

    fn write_script(path: &Path, mode: FileMode) -> String {
        let p = Self::quote_path(path);
        let tmp = shell_quote(&format!("{}{}", path.to_string_lossy(), TMP_SUFFIX));
        let dir = path
            .parent()
            .map(Self::quote_path)
            .unwrap_or_else(|| "/".to_string());
        format!(
            "mkdir -p {dir} && cat > {tmp} && chmod {mode} {tmp} && mv -f {tmp} {p}",
            dir = dir,
            tmp = tmp,
            mode = mode,
            p = p
        )
    }

    fn chmod_script(path: &Path, mode: FileMode) -> String {
        format!("chmod {} {}", mode, Self::quote_path(path))
    }

    fn commands_script(commands: &[String]) -> String {
        let mut script = String::from("set -e");
        for command in commands {
            script.push('\n');
            script.push_str(command);
        }
        script
    }

    fn parse_state(output: &str) -> HostResult<RemoteState> {
        let mut lines = output.lines().map(str::trim).filter(|l| !l.is_empty());
        match (lines.next(), lines.next()) {
            (Some("absent"), None) => Ok(RemoteState::Absent),
            (Some(hash_line), Some(mode_line)) => {
                let hash = ContentHash::from_sha256sum(hash_line).ok_or_else(|| {
                    HostError::Protocol(format!("unexpected sha256sum output '{}'", hash_line))
                })?;
                let mode = mode_line
                    .parse::<FileMode>()
                    .map_err(|e| HostError::Protocol(e.to_string()))?;
                Ok(RemoteState::Present { hash, mode })
            }
            _ => Err(HostError::Protocol(format!(
                "unexpected state output '{}'",
                output.trim()
            ))),
        }
    }

    /// Run a script on the host, optionally feeding it stdin
    fn run_ssh(&self, label: &str, script: &str, input: Option<&[u8]>) -> HostResult<String> {
        let mut child = Command::new(&self.program)
            .arg("-o")
            .arg("BatchMode=yes")
            .arg(&self.destination)
            .arg(script)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HostError::Connection(format!("{}: {}", self.program, e)))?;

        if let Some(bytes) = input {
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(bytes)
                    .map_err(|e| HostError::Connection(e.to_string()))?;
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| HostError::Connection(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if output.status.code() == Some(SSH_CONNECTION_FAILURE) {
                return Err(HostError::Connection(format!(
                    "{}: {}",
                    self.destination, stderr
                )));
            }
            return Err(HostError::CommandFailed {
                command: label.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn remote_state(&self, path: &Path, privilege: Privilege) -> HostResult<RemoteState> {
        let script = Self::wrap(&Self::state_script(path), privilege);
        let output = self.run_ssh(&format!("stat {}", path.display()), &script, None)?;
        Self::parse_state(&output)
    }
}

impl RemoteHost for SshHost {
    fn put(
        &self,
        content: &[u8],
        destination: &Path,
        mode: FileMode,
        privilege: Privilege,
    ) -> HostResult<bool> {
        let wanted = ContentHash::from_bytes(content);
        let state = self.remote_state(destination, privilege)?;
        let action = PutAction::plan(&state, &wanted, mode);

        if self.dry_run {
            return Ok(action != PutAction::Nothing);
        }

        match action {
            PutAction::Nothing => Ok(false),
            PutAction::Chmod => {
                let script = Self::wrap(&Self::chmod_script(destination, mode), privilege);
                self.run_ssh(&format!("chmod {}", destination.display()), &script, None)?;
                Ok(true)
            }
            PutAction::Write => {
                let script = Self::wrap(&Self::write_script(destination, mode), privilege);
                self.run_ssh(
                    &format!("write {}", destination.display()),
                    &script,
                    Some(content),
                )?;
                Ok(true)
            }
        }
    }

    fn reload_units(&self) -> HostResult<()> {
        if self.dry_run {
            return Ok(());
        }
        let script = Self::wrap("systemctl daemon-reload", Privilege::Elevated);
        self.run_ssh("systemctl daemon-reload", &script, None)
            .map(|_| ())
    }

    fn restart_service(&self, name: &str) -> HostResult<()> {
        if self.dry_run {
            return Ok(());
        }
        let command = format!("systemctl restart {}", shell_quote(name));
        let script = Self::wrap(&command, Privilege::Elevated);
        self.run_ssh(&command, &script, None).map(|_| ())
    }

    fn run(&self, commands: &[String], privilege: Privilege) -> HostResult<()> {
        if self.dry_run || commands.is_empty() {
            return Ok(());
        }
        let script = Self::wrap(&Self::commands_script(commands), privilege);
        self.run_ssh(&commands.join(" && "), &script, None)
            .map(|_| ())
    }

    fn display_name(&self) -> String {
        self.destination.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SHA: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn wrap_normal_is_unchanged() {
        assert_eq!(SshHost::wrap("true", Privilege::Normal), "true");
    }

    #[test]
    fn wrap_elevated_uses_noninteractive_sudo() {
        assert_eq!(
            SshHost::wrap("chmod 644 '/etc/x'", Privilege::Elevated),
            "sudo -n sh -c 'chmod 644 '\\''/etc/x'\\'''"
        );
    }

    #[test]
    fn write_script_goes_through_temp_file() {
        let script = SshHost::write_script(
            Path::new("/etc/systemd/system/ipad-watchdog.service"),
            FileMode::READABLE,
        );
        assert_eq!(
            script,
            "mkdir -p '/etc/systemd/system' && cat > '/etc/systemd/system/ipad-watchdog.service.mesh-tmp' && chmod 644 '/etc/systemd/system/ipad-watchdog.service.mesh-tmp' && mv -f '/etc/systemd/system/ipad-watchdog.service.mesh-tmp' '/etc/systemd/system/ipad-watchdog.service'"
        );
    }

    #[test]
    fn commands_script_stops_on_first_failure() {
        let script = SshHost::commands_script(&["adb push a b".to_string(), "adb shell ls".to_string()]);
        assert_eq!(script, "set -e\nadb push a b\nadb shell ls");
    }

    #[test]
    fn parse_state_absent() {
        assert_eq!(SshHost::parse_state("absent\n").unwrap(), RemoteState::Absent);
    }

    #[test]
    fn parse_state_present() {
        let out = format!("{}\n755\n", HELLO_SHA);
        assert_eq!(
            SshHost::parse_state(&out).unwrap(),
            RemoteState::Present {
                hash: ContentHash::from_bytes(b"hello"),
                mode: FileMode::EXECUTABLE,
            }
        );
    }

    #[test]
    fn parse_state_rejects_garbage() {
        assert!(SshHost::parse_state("").is_err());
        assert!(SshHost::parse_state("Permission denied\n").is_err());
        assert!(SshHost::parse_state("nothex\n755\n").is_err());
    }

    #[test]
    fn plan_writes_when_absent_or_content_differs() {
        let wanted = ContentHash::from_bytes(b"hello");
        assert_eq!(
            PutAction::plan(&RemoteState::Absent, &wanted, FileMode::EXECUTABLE),
            PutAction::Write
        );
        let stale = RemoteState::Present {
            hash: ContentHash::from_bytes(b"old"),
            mode: FileMode::EXECUTABLE,
        };
        assert_eq!(
            PutAction::plan(&stale, &wanted, FileMode::EXECUTABLE),
            PutAction::Write
        );
    }

    #[test]
    fn plan_chmods_when_only_mode_differs() {
        let wanted = ContentHash::from_bytes(b"hello");
        let state = RemoteState::Present {
            hash: wanted.clone(),
            mode: FileMode::READABLE,
        };
        assert_eq!(
            PutAction::plan(&state, &wanted, FileMode::EXECUTABLE),
            PutAction::Chmod
        );
    }

    #[test]
    fn plan_does_nothing_when_converged() {
        let wanted = ContentHash::from_bytes(b"hello");
        let state = RemoteState::Present {
            hash: wanted.clone(),
            mode: FileMode::EXECUTABLE,
        };
        assert_eq!(
            PutAction::plan(&state, &wanted, FileMode::EXECUTABLE),
            PutAction::Nothing
        );
    }

    #[test]
    fn missing_program_is_connection_error() {
        let host = SshHost::new("pi").with_program("/nonexistent/ssh-binary");
        let err = host.reload_units().unwrap_err();
        assert!(matches!(err, HostError::Connection(_)));
    }

    #[test]
    fn dry_run_skips_actions() {
        let host = SshHost::new("pi")
            .with_program("/nonexistent/ssh-binary")
            .with_dry_run(true);
        assert!(host.reload_units().is_ok());
        assert!(host.restart_service("pixel-watchdog").is_ok());
        assert!(host.run(&["true".to_string()], Privilege::Normal).is_ok());
    }
}
