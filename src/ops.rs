//! Helper actions: one remote shell command per subcommand
//!
//! Configured values are validated as plain tokens at load time and are
//! interpolated as-is. Operator arguments for `npm` are quoted one by one;
//! `ssh` forwards the operator's command untouched on purpose.

use crate::config::{Config, Credentials};
use crate::error::{VpsError, VpsResult};
use crate::remote::{quote_if_needed, ExecOutcome, OutputMode, RemoteExecutor};

pub const DEFAULT_LOG_LINES: u32 = 50;
pub const DEFAULT_PORT: u16 = 3000;

/// Row count query used by `vpsctl db` to prove the connection works
const DB_CHECK_QUERY: &str = "SELECT COUNT(*) AS total_users FROM users;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// pm2 process list
    Status,
    /// Last `lines` log lines of the pm2 process
    Logs { lines: u32 },
    /// Restart the pm2 process
    Restart,
    /// `npm <args>` inside the app directory
    Npm { args: Vec<String> },
    /// `npm run seed`
    Seed,
    /// Check whether `port` is listening
    Port { port: u16 },
    /// Database connectivity check
    Db,
    /// Raw remote command
    Ssh { command: Vec<String> },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Status => "status",
            Action::Logs { .. } => "logs",
            Action::Restart => "restart",
            Action::Npm { .. } => "npm",
            Action::Seed => "seed",
            Action::Port { .. } => "port",
            Action::Db => "db",
            Action::Ssh { .. } => "ssh",
        }
    }

    /// The remote shell command this action runs
    pub fn remote_command(&self, config: &Config) -> VpsResult<String> {
        let app = &config.app.path;
        let pm2 = format!("{} node_modules/.bin/pm2", config.app.node_bin);

        let cmd = match self {
            Action::Status => format!("cd {} && {} status", app, pm2),
            Action::Logs { lines } => format!(
                "cd {} && {} logs {} --lines {} --nostream",
                app, pm2, config.app.pm2_name, lines
            ),
            Action::Restart => format!("cd {} && {} restart {}", app, pm2, config.app.pm2_name),
            Action::Npm { args } => {
                if args.is_empty() {
                    return Err(VpsError::InvalidArgument {
                        message: "npm needs at least one argument (e.g. `vpsctl npm install`)"
                            .to_string(),
                    });
                }
                let quoted: Vec<String> = args.iter().map(|a| quote_if_needed(a)).collect();
                format!("cd {} && npm {}", app, quoted.join(" "))
            }
            Action::Seed => format!("cd {} && npm run seed", app),
            Action::Port { port } => format!(
                "netstat -tulpn 2>/dev/null | grep ':{port}' || echo 'Port {port} is not listening'"
            ),
            Action::Db => format!(
                "IFS= read -r MYSQL_PWD; export MYSQL_PWD; mysql -h {} -u {} {} -e '{}'",
                config.database.host, config.database.user, config.database.name, DB_CHECK_QUERY
            ),
            Action::Ssh { command } => {
                let joined = command.join(" ");
                if joined.trim().is_empty() {
                    return Err(VpsError::InvalidArgument {
                        message: "ssh needs a command to run (e.g. `vpsctl ssh uptime`)"
                            .to_string(),
                    });
                }
                joined
            }
        };
        Ok(cmd)
    }
}

/// Run one helper action; every call is independent of the others
pub fn run_action(
    action: &Action,
    config: &Config,
    credentials: &Credentials,
    exec: &RemoteExecutor<'_>,
    output: OutputMode,
) -> VpsResult<ExecOutcome> {
    let command = action.remote_command(config)?;
    match action {
        Action::Db => {
            let stdin = format!("{}\n", credentials.db_password()?);
            exec.exec_with_stdin(action.name(), &command, &stdin, output)
        }
        _ => exec.exec(action.name(), &command, output),
    }
}
