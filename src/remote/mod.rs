//! Remote execution over SSH
//!
//! Builds parameterized `ssh`/`scp`/`rsync` invocations for the configured
//! host and runs them one at a time through a pluggable runner.

mod executor;
mod invocation;
mod runner;
mod ssh;

pub use executor::RemoteExecutor;
pub use invocation::{quote_if_needed, shell_quote, Invocation};
pub use runner::{CommandRunner, DryRunRunner, ExecOutcome, OutputMode, SystemRunner};
pub use ssh::SshClient;

#[cfg(test)]
pub(crate) use runner::RecordingRunner;
