//! vpsctl - deploy files to a VPS and run remote maintenance commands
//!
//! Every operation is one or more `ssh`/`scp`/`rsync` subprocesses against a
//! single configured host, run one at a time. Passwords come from the
//! environment only.

pub mod config;
pub mod deploy;
pub mod error;
pub mod ops;
pub mod remote;
pub mod uploads;

// Re-exports for convenience
pub use config::{Config, Credentials, LoadedConfig};
pub use deploy::{run_deploy, DeployEvent, DeployEventSink, DeployReport, RestartStatus};
pub use error::{VpsError, VpsResult};
pub use ops::{run_action, Action};
pub use remote::{CommandRunner, OutputMode, RemoteExecutor, SshClient, SystemRunner};
pub use uploads::{sync_uploads, UploadsReport};
