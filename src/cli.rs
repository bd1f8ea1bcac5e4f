//! CLI Argument Parsing
//!
//! Global flags (--config, --json, --color, --verbose, --dry-run) are
//! inherited by all subcommands.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vpsctl::ops::{DEFAULT_LOG_LINES, DEFAULT_PORT};
use vpsctl::Action;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// vpsctl - deploy to a VPS and run remote maintenance commands over SSH
#[derive(Parser, Debug)]
#[command(name = "vpsctl")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Passwords are read from VPSCTL_PASSWORD (or SSHPASS) and VPSCTL_DB_PASSWORD.\nWithout VPSCTL_PASSWORD, ssh uses key-based authentication."
)]
pub struct Cli {
    /// Config file (defaults to ./vpsctl.toml, then ~/.config/vpsctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v prints each ssh/scp invocation, -vv also remote stderr)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print the ssh/scp/rsync invocations instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the configured files to the server, then restart the app
    Deploy,

    /// Show pm2 process status
    Status,

    /// Print the last N pm2 log lines and exit (logs are not followed live)
    Logs {
        /// Number of log lines
        #[arg(value_name = "N")]
        lines: Option<u32>,
    },

    /// Restart the app under pm2
    Restart,

    /// Run npm in the app directory (e.g. `vpsctl npm install --production`)
    Npm {
        /// Arguments passed to npm
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "ARGS"
        )]
        args: Vec<String>,
    },

    /// Run the app's seed script (npm run seed)
    Seed,

    /// Check whether a TCP port is listening on the server
    Port {
        /// Port number
        #[arg(value_name = "N")]
        port: Option<u16>,
    },

    /// Check database connectivity (counts rows in the users table)
    Db,

    /// Run an arbitrary command on the server
    Ssh {
        /// Command and arguments, forwarded verbatim
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "CMD"
        )]
        command: Vec<String>,
    },

    /// Mirror the local uploads directory to the server with rsync
    SyncUploads,
}

/// Global flags that consume the next argument as their value
const VALUE_FLAGS: &[&str] = &["--config", "--color"];

/// Lowercase the subcommand name so `vpsctl STATUS` runs `status`.
/// Arguments after the subcommand are left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let mut i = 1;
    while i < args.len() {
        let Some(arg) = args[i].to_str() else {
            break;
        };
        if arg == "--" {
            break;
        }
        if VALUE_FLAGS.contains(&arg) {
            i += 2;
            continue;
        }
        if arg.starts_with('-') {
            i += 1;
            continue;
        }
        let lowered = arg.to_lowercase();
        args[i] = lowered.into();
        break;
    }
    args
}

impl Commands {
    /// Helper subcommands map onto a single remote action
    pub fn action(&self) -> Option<Action> {
        let action = match self {
            Commands::Status => Action::Status,
            Commands::Logs { lines } => Action::Logs {
                lines: lines.unwrap_or(DEFAULT_LOG_LINES),
            },
            Commands::Restart => Action::Restart,
            Commands::Npm { args } => Action::Npm { args: args.clone() },
            Commands::Seed => Action::Seed,
            Commands::Port { port } => Action::Port {
                port: port.unwrap_or(DEFAULT_PORT),
            },
            Commands::Db => Action::Db,
            Commands::Ssh { command } => Action::Ssh {
                command: command.clone(),
            },
            Commands::Deploy | Commands::SyncUploads => return None,
        };
        Some(action)
    }
}
