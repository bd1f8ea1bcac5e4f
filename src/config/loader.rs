//! Configuration discovery, loading and environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{VpsError, VpsResult};

use super::env_validator::{parse_bool, suggest, EnvVarValidator};
use super::types::Config;

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "vpsctl.toml";

/// Keys accepted anywhere in the file, used for typo suggestions
const KNOWN_KEYS: &[&str] = &[
    "server",
    "host",
    "user",
    "port",
    "verify_host_key",
    "app",
    "path",
    "node_bin",
    "pm2_name",
    "verify_url",
    "database",
    "name",
    "deploy",
    "files",
    "local",
    "remote_dir",
    "restart",
    "uploads",
    "local_dir",
    "include",
];

/// What kind of non-fatal problem was found in a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    UnknownKey,
    /// A credential-looking key; the value is ignored
    SecretInFile,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub kind: WarningKind,
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Fully loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> VpsResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

fn parse_with_warnings(content: &str, path: &Path) -> VpsResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| VpsError::Config {
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
            let kind = if looks_like_secret(&key) {
                WarningKind::SecretInFile
            } else {
                WarningKind::UnknownKey
            };
            let suggestion = match kind {
                WarningKind::UnknownKey => suggest(&key, KNOWN_KEYS).map(str::to_string),
                WarningKind::SecretInFile => None,
            };
            ConfigWarning {
                kind,
                line: find_line_number(content, &key),
                key,
                file: path.to_path_buf(),
                suggestion,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick the config file: explicit path, then `./vpsctl.toml`, then the user
/// config directory.
pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    let user = dirs::config_dir()?.join("vpsctl").join("config.toml");
    user.is_file().then_some(user)
}

/// Discover, parse, apply `VPSCTL_*` overrides and validate.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> VpsResult<LoadedConfig> {
    let source = discover(explicit, cwd);

    let (config, warnings) = match &source {
        Some(path) => {
            if !path.is_file() {
                return Err(VpsError::Config {
                    file: path.clone(),
                    message: "file not found".to_string(),
                });
            }
            load_with_warnings(path)?
        }
        None => (Config::default(), Vec::new()),
    };

    let config = with_env_overrides(config, |key| std::env::var(key).ok());
    config.validate()?;

    Ok(LoadedConfig {
        config,
        source,
        warnings,
    })
}

/// Apply environment variable overrides (VPSCTL_* prefix)
pub fn with_env_overrides(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(host) = get_env("VPSCTL_HOST").filter(|v| !v.trim().is_empty()) {
        config.server.host = Some(host.trim().to_string());
    }

    if let Some(user) = get_env("VPSCTL_USER").filter(|v| !v.trim().is_empty()) {
        config.server.user = user.trim().to_string();
    }

    if let Some(path) = get_env("VPSCTL_APP_PATH").filter(|v| !v.trim().is_empty()) {
        config.app.path = path.trim().to_string();
    }

    if let Some(name) = get_env("VPSCTL_PM2_NAME").filter(|v| !v.trim().is_empty()) {
        config.app.pm2_name = name.trim().to_string();
    }

    if let Some(value) = get_env("VPSCTL_VERIFY_HOST_KEY") {
        let validator = EnvVarValidator::new("VPSCTL_VERIFY_HOST_KEY", &["true", "false"]);
        config.server.verify_host_key =
            validator.parse(&value, parse_bool, config.server.verify_host_key);
    }

    config
}

fn looks_like_secret(key: &str) -> bool {
    let key = key.to_lowercase();
    key.contains("password") || key.contains("passwd") || key == "pass" || key == "secret"
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

#[cfg(test)]
pub(super) fn parse_str(content: &str) -> VpsResult<(Config, Vec<ConfigWarning>)> {
    parse_with_warnings(content, Path::new("vpsctl.toml"))
}
