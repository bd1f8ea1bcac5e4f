//! SSH, SCP and rsync argument vectors for the configured host
//!
//! With a password available every tool is wrapped in `sshpass -e`, which
//! reads the password from the child's `SSHPASS` variable. Without one, ssh
//! runs in batch mode so key-based auth fails fast instead of prompting.

use std::path::Path;

use super::invocation::Invocation;
use crate::config::{Config, Credentials, SSHPASS_VAR};
use crate::error::VpsResult;

/// Connection parameters shared by all remote steps
#[derive(Clone)]
pub struct SshClient {
    destination: String,
    port: Option<u16>,
    verify_host_key: bool,
    password: Option<String>,
}

impl SshClient {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            port: None,
            verify_host_key: false,
            password: None,
        }
    }

    pub fn from_config(config: &Config, credentials: &Credentials) -> VpsResult<Self> {
        Ok(Self {
            destination: config.destination()?,
            port: config.server.port,
            verify_host_key: config.server.verify_host_key,
            password: credentials.ssh_password().map(str::to_string),
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn verify_host_key(mut self, verify: bool) -> Self {
        self.verify_host_key = verify;
        self
    }

    /// `user@host`
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn uses_password(&self) -> bool {
        self.password.is_some()
    }

    /// Run `command` through the remote login shell
    pub fn command(&self, command: &str) -> Invocation {
        let mut args = self.ssh_options();
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        args.push(self.destination.clone());
        args.push(command.to_string());
        self.wrap("ssh", args)
    }

    /// Copy one local file into a remote directory
    pub fn copy(&self, local: &Path, remote_dir: &str) -> Invocation {
        let mut args = self.ssh_options();
        if let Some(port) = self.port {
            args.push("-P".to_string());
            args.push(port.to_string());
        }
        args.push(local.display().to_string());
        args.push(format!("{}:{}", self.destination, remote_dir));
        self.wrap("scp", args)
    }

    /// Mirror files matching `include` from `local_dir` into `remote_dir`,
    /// deleting remote files that no longer exist locally
    pub fn mirror(&self, local_dir: &Path, remote_dir: &str, include: &str) -> Invocation {
        let mut rsh = vec!["ssh".to_string()];
        rsh.extend(self.ssh_options());
        if let Some(port) = self.port {
            rsh.push("-p".to_string());
            rsh.push(port.to_string());
        }

        let args = vec![
            "-avz".to_string(),
            format!("--filter=+ {}", include),
            "--filter=- *".to_string(),
            "--delete".to_string(),
            format!("--rsh={}", rsh.join(" ")),
            format!("{}/", local_dir.display().to_string().trim_end_matches('/')),
            format!("{}:{}/", self.destination, remote_dir.trim_end_matches('/')),
        ];
        self.wrap("rsync", args)
    }

    fn ssh_options(&self) -> Vec<String> {
        let mut opts = Vec::new();
        if self.password.is_none() {
            opts.push("-o".to_string());
            opts.push("BatchMode=yes".to_string());
        }
        if !self.verify_host_key {
            opts.push("-o".to_string());
            opts.push("StrictHostKeyChecking=no".to_string());
            opts.push("-o".to_string());
            opts.push("UserKnownHostsFile=/dev/null".to_string());
        }
        opts
    }

    fn wrap(&self, program: &str, args: Vec<String>) -> Invocation {
        match &self.password {
            Some(password) => Invocation::new("sshpass")
                .args(["-e", program])
                .args(args)
                .env(SSHPASS_VAR, password.clone()),
            None => Invocation::new(program).args(args),
        }
    }
}

impl std::fmt::Debug for SshClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshClient")
            .field("destination", &self.destination)
            .field("port", &self.port)
            .field("verify_host_key", &self.verify_host_key)
            .field("uses_password", &self.uses_password())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn with_password() -> SshClient {
        SshClient::new("root@203.0.113.7").with_password("hunter2")
    }

    #[test]
    fn command_with_password_uses_sshpass_env() {
        let inv = with_password().command("pm2 status");
        assert_eq!(inv.program, "sshpass");
        assert_eq!(
            inv.args,
            vec![
                "-e",
                "ssh",
                "-o",
                "StrictHostKeyChecking=no",
                "-o",
                "UserKnownHostsFile=/dev/null",
                "root@203.0.113.7",
                "pm2 status",
            ]
        );
        assert_eq!(inv.env, vec![("SSHPASS".to_string(), "hunter2".to_string())]);
        assert!(inv.args.iter().all(|a| !a.contains("hunter2")));
    }

    #[test]
    fn command_without_password_uses_batch_mode() {
        let inv = SshClient::new("deploy@example.com")
            .verify_host_key(true)
            .with_port(2222)
            .command("uptime");
        assert_eq!(inv.program, "ssh");
        assert_eq!(
            inv.args,
            vec!["-o", "BatchMode=yes", "-p", "2222", "deploy@example.com", "uptime"]
        );
        assert!(inv.env.is_empty());
    }

    #[test]
    fn copy_targets_remote_directory() {
        let inv = with_password()
            .with_port(2222)
            .copy(&PathBuf::from("src/app.js"), "/var/www/app/src/");
        assert_eq!(inv.program, "sshpass");
        assert_eq!(inv.args[1], "scp");
        let n = inv.args.len();
        assert_eq!(inv.args[n - 4..], ["-P", "2222", "src/app.js", "root@203.0.113.7:/var/www/app/src/"]);
    }

    #[test]
    fn mirror_filters_and_deletes() {
        let inv = with_password().mirror(
            &PathBuf::from("public/uploads/"),
            "/var/www/app/public/uploads",
            "*.webp",
        );
        assert_eq!(inv.args[1], "rsync");
        assert!(inv.args.contains(&"--filter=+ *.webp".to_string()));
        assert!(inv.args.contains(&"--filter=- *".to_string()));
        assert!(inv.args.contains(&"--delete".to_string()));
        assert!(inv.args.contains(
            &"--rsh=ssh -o StrictHostKeyChecking=no -o UserKnownHostsFile=/dev/null".to_string()
        ));
        let n = inv.args.len();
        assert_eq!(inv.args[n - 2], "public/uploads/");
        assert_eq!(inv.args[n - 1], "root@203.0.113.7:/var/www/app/public/uploads/");
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", with_password());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("uses_password: true"));
    }
}
