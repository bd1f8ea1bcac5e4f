//! Isolated environment for running the vpsctl binary.
//!
//! Fake `ssh`, `scp`, `rsync` and `sshpass` scripts are placed first on
//! `PATH`. Each one appends its argv to a log file and exits 0, unless its
//! argv contains the `FAKE_FAIL_MATCH` substring.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

const FAKE_TOOL: &str = r#"#!/bin/sh
name=$(basename "$0")
{
  printf '%s' "$name"
  for a in "$@"; do printf ' %s' "$a"; done
  printf '\n'
} >> "$FAKE_LOG"
if [ "$name" = "sshpass" ]; then
  printf '%s' "$SSHPASS" > "$FAKE_LOG.sshpass"
  shift
  exec "$@"
fi
if [ -n "$FAKE_FAIL_MATCH" ]; then
  case "$*" in
    *"$FAKE_FAIL_MATCH"*)
      echo "fake $name failure" >&2
      exit "${FAKE_FAIL_CODE:-1}"
      ;;
  esac
fi
if [ "$name" = "ssh" ] && [ -n "$FAKE_READ_STDIN" ]; then
  cat > "$FAKE_LOG.stdin"
fi
if [ -n "$FAKE_STDOUT" ]; then
  echo "$FAKE_STDOUT"
fi
exit 0
"#;

/// Result of running the vpsctl binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin_dir: TempDir,
    log: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let project_root = tempfile::tempdir().expect("project tempdir");
        let home_dir = tempfile::tempdir().expect("home tempdir");
        let bin_dir = tempfile::tempdir().expect("bin tempdir");

        for tool in ["ssh", "scp", "rsync", "sshpass"] {
            let path = bin_dir.path().join(tool);
            fs::write(&path, FAKE_TOOL).expect("write fake tool");
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("chmod fake tool");
        }

        let log = bin_dir.path().join("invocations.log");
        Self {
            project_root,
            home_dir,
            bin_dir,
            log,
        }
    }

    /// New environment with `vpsctl.toml` already written
    pub fn with_config(config: &str) -> Self {
        let env = Self::new();
        env.write_project_file("vpsctl.toml", config);
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let path = format!(
            "{}:{}",
            self.bin_dir.path().display(),
            std::env::var("PATH").unwrap_or_default()
        );

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vpsctl"));
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("PATH", path)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env("FAKE_LOG", &self.log);

        for key in [
            "VPSCTL_HOST",
            "VPSCTL_USER",
            "VPSCTL_APP_PATH",
            "VPSCTL_PM2_NAME",
            "VPSCTL_VERIFY_HOST_KEY",
            "VPSCTL_PASSWORD",
            "VPSCTL_DB_PASSWORD",
            "SSHPASS",
            "FAKE_FAIL_MATCH",
            "FAKE_FAIL_CODE",
            "FAKE_STDOUT",
            "FAKE_READ_STDIN",
        ] {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute vpsctl");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// One line per fake tool invocation, in order
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Password the fake `sshpass` saw in its environment
    pub fn sshpass_env(&self) -> Option<String> {
        fs::read_to_string(self.log.with_extension("log.sshpass")).ok()
    }

    /// Stdin received by the last fake `ssh` run with `FAKE_READ_STDIN`
    pub fn ssh_stdin(&self) -> Option<String> {
        fs::read_to_string(self.log.with_extension("log.stdin")).ok()
    }

    pub fn log_path(&self) -> &Path {
        &self.log
    }
}
