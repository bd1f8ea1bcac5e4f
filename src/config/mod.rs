//! Configuration module for vpsctl
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (VPSCTL_*)
//! 3. Config file (`--config`, `./vpsctl.toml`, `~/.config/vpsctl/config.toml`)
//! 4. Built-in defaults (lowest priority)
//!
//! Secrets only ever come from the environment (see [`Credentials`]).

mod credentials;
mod env_validator;
mod loader;
mod types;

pub use credentials::{
    Credentials, DB_PASSWORD_VAR, REDACTED, SSHPASS_VAR, SSH_PASSWORD_VAR,
};
pub use env_validator::{levenshtein, parse_bool, EnvVarValidator};
pub use loader::{
    discover, load, load_with_warnings, with_env_overrides, ConfigWarning, LoadedConfig,
    WarningKind, PROJECT_CONFIG_FILE,
};
pub use types::{
    is_shell_safe, AppConfig, Config, DatabaseConfig, DeployConfig, DeployFile, ServerConfig,
    UploadsConfig,
};
