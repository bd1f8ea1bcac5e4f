//! Secrets read from the environment
//!
//! Passwords are never read from config files or compiled in.

use std::fmt;

use crate::error::{VpsError, VpsResult};

pub const SSH_PASSWORD_VAR: &str = "VPSCTL_PASSWORD";
/// Variable `sshpass -e` reads; accepted as a fallback
pub const SSHPASS_VAR: &str = "SSHPASS";
pub const DB_PASSWORD_VAR: &str = "VPSCTL_DB_PASSWORD";

/// Placeholder used whenever a secret is rendered
pub const REDACTED: &str = "********";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    ssh_password: Option<String>,
    db_password: Option<String>,
}

impl Credentials {
    pub fn new(ssh_password: Option<String>, db_password: Option<String>) -> Self {
        Self {
            ssh_password: ssh_password.filter(|p| !p.is_empty()),
            db_password: db_password.filter(|p| !p.is_empty()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get_env: impl Fn(&str) -> Option<String>) -> Self {
        let ssh = get_env(SSH_PASSWORD_VAR)
            .filter(|p| !p.is_empty())
            .or_else(|| get_env(SSHPASS_VAR));
        Self::new(ssh, get_env(DB_PASSWORD_VAR))
    }

    /// SSH password, if password authentication is in use
    pub fn ssh_password(&self) -> Option<&str> {
        self.ssh_password.as_deref()
    }

    /// Database password; required by `vpsctl db`
    pub fn db_password(&self) -> VpsResult<&str> {
        self.db_password
            .as_deref()
            .ok_or_else(|| VpsError::MissingCredential {
                var: DB_PASSWORD_VAR.to_string(),
            })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| REDACTED);
        f.debug_struct("Credentials")
            .field("ssh_password", &mask(&self.ssh_password))
            .field("db_password", &mask(&self.db_password))
            .finish()
    }
}
