//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{VpsError, VpsResult};

/// Top-level configuration (`vpsctl.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub uploads: UploadsConfig,
}

/// Connection settings for the remote host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or address; required before anything runs
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub port: Option<u16>,

    /// When false, ssh runs with `StrictHostKeyChecking=no` and a throwaway
    /// known-hosts file.
    #[serde(default)]
    pub verify_host_key: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: None,
            user: default_user(),
            port: None,
            verify_host_key: false,
        }
    }
}

fn default_user() -> String {
    "root".to_string()
}

/// Remote application layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_app_path")]
    pub path: String,

    #[serde(default = "default_node_bin")]
    pub node_bin: String,

    #[serde(default = "default_pm2_name")]
    pub pm2_name: String,

    /// Printed after a deploy so the operator knows where to look
    #[serde(default)]
    pub verify_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            path: default_app_path(),
            node_bin: default_node_bin(),
            pm2_name: default_pm2_name(),
            verify_url: None,
        }
    }
}

fn default_app_path() -> String {
    "/var/www/app".to_string()
}

fn default_node_bin() -> String {
    "node".to_string()
}

fn default_pm2_name() -> String {
    "app".to_string()
}

/// Database used by `vpsctl db`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_db_user")]
    pub user: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            name: default_db_name(),
            user: default_db_user(),
        }
    }
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_name() -> String {
    "app".to_string()
}

fn default_db_user() -> String {
    "app".to_string()
}

/// Files pushed by `vpsctl deploy`, in order
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DeployConfig {
    #[serde(default)]
    pub files: Vec<DeployFile>,

    /// Remote command run inside the app directory after all copies succeed.
    /// Defaults to `pm2 restart <app.pm2_name>`.
    #[serde(default)]
    pub restart: Option<String>,
}

/// One (local path, remote directory) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployFile {
    pub local: PathBuf,
    /// Absolute, or relative to `app.path`
    pub remote_dir: String,
}

/// Uploads mirrored by `vpsctl sync-uploads`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadsConfig {
    #[serde(default = "default_uploads_dir")]
    pub local_dir: PathBuf,

    /// Absolute, or relative to `app.path`
    #[serde(default = "default_uploads_remote")]
    pub remote_dir: String,

    #[serde(default = "default_uploads_include")]
    pub include: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            local_dir: default_uploads_dir(),
            remote_dir: default_uploads_remote(),
            include: default_uploads_include(),
        }
    }
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("public/uploads")
}

fn default_uploads_remote() -> String {
    "public/uploads".to_string()
}

fn default_uploads_include() -> String {
    "*.webp".to_string()
}

impl Config {
    /// `user@host` destination for ssh/scp/rsync
    pub fn destination(&self) -> VpsResult<String> {
        let host = self
            .server
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or(VpsError::MissingHost)?;
        if host.contains('@') {
            return Ok(host.to_string());
        }
        Ok(format!("{}@{}", self.server.user, host))
    }

    /// Resolve a remote directory against the application path
    pub fn remote_path(&self, dir: &str) -> String {
        if dir.starts_with('/') || dir.starts_with('~') {
            return dir.to_string();
        }
        let base = self.app.path.trim_end_matches('/');
        let rel = dir.trim_start_matches("./");
        if rel.is_empty() || rel == "." {
            return base.to_string();
        }
        format!("{}/{}", base, rel)
    }

    /// Remote restart command used at the end of a deploy
    pub fn restart_command(&self) -> String {
        match &self.deploy.restart {
            Some(cmd) if !cmd.trim().is_empty() => cmd.trim().to_string(),
            _ => format!("pm2 restart {}", self.app.pm2_name),
        }
    }

    /// Check that every value interpolated into a remote shell string is a
    /// plain token. Free-form commands (`deploy.restart`) are the operator's
    /// own and are not checked.
    pub fn validate(&self) -> VpsResult<()> {
        if let Some(host) = &self.server.host {
            check_argument("server.host", host)?;
        }
        check_argument("server.user", &self.server.user)?;
        check_token("app.path", &self.app.path)?;
        check_argument("app.node_bin", &self.app.node_bin)?;
        check_token("app.pm2_name", &self.app.pm2_name)?;
        check_token("database.host", &self.database.host)?;
        check_token("database.name", &self.database.name)?;
        check_token("database.user", &self.database.user)?;
        for (i, file) in self.deploy.files.iter().enumerate() {
            check_token(&format!("deploy.files[{}].remote_dir", i), &file.remote_dir)?;
        }
        check_token("uploads.remote_dir", &self.uploads.remote_dir)?;
        if self.uploads.include.trim().is_empty() {
            return Err(invalid("uploads.include", "", "pattern must not be empty"));
        }
        Ok(())
    }
}

/// Characters allowed in values that end up unquoted in a remote shell command
pub fn is_shell_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./@:+~=,%".contains(c))
}

fn check_token(key: &str, value: &str) -> VpsResult<()> {
    if value.is_empty() {
        return Err(invalid(key, value, "must not be empty"));
    }
    if !is_shell_safe(value) {
        return Err(invalid(
            key,
            value,
            "only letters, digits and _-./@:+~=,% are allowed",
        ));
    }
    Ok(())
}

/// Values placed as their own argv entry must not be read as an option
fn check_argument(key: &str, value: &str) -> VpsResult<()> {
    check_token(key, value)?;
    if value.starts_with('-') {
        return Err(invalid(key, value, "must not start with '-'"));
    }
    Ok(())
}

fn invalid(key: &str, value: &str, reason: &str) -> VpsError {
    VpsError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
