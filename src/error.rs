//! Error types for vpsctl
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vpsctl operations
pub type VpsResult<T> = Result<T, VpsError>;

/// Main error type for vpsctl operations
#[derive(Error, Debug)]
pub enum VpsError {
    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// No remote host configured anywhere
    #[error("no remote host configured - set VPSCTL_HOST or `host` in vpsctl.toml")]
    MissingHost,

    /// A setting holds a value that cannot be used safely
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    /// A required secret is not present in the environment
    #[error("missing credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    /// Operator supplied arguments that cannot be forwarded
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Local helper binary could not be started (ssh, scp, sshpass, rsync)
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote step exited with a non-zero status
    #[error("{step} failed ({})", exit_label(.code))]
    RemoteFailed {
        step: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Local file or directory does not exist
    #[error("local path not found: {path}")]
    LocalPathMissing { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VpsError {
    /// Captured stderr of a failed remote step, if any
    pub fn remote_stderr(&self) -> Option<&str> {
        match self {
            VpsError::RemoteFailed { stderr, .. } if !stderr.trim().is_empty() => Some(stderr),
            _ => None,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
