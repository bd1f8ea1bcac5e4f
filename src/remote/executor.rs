//! Remote command executor
//!
//! Pairs an [`SshClient`] with a [`CommandRunner`] and turns non-zero exit
//! codes into [`VpsError::RemoteFailed`]. One subprocess at a time, no
//! retries and no timeouts.

use std::path::Path;

use super::invocation::Invocation;
use super::runner::{CommandRunner, ExecOutcome, OutputMode};
use super::ssh::SshClient;
use crate::error::{VpsError, VpsResult};

pub struct RemoteExecutor<'r> {
    client: SshClient,
    runner: &'r dyn CommandRunner,
}

impl<'r> RemoteExecutor<'r> {
    pub fn new(client: SshClient, runner: &'r dyn CommandRunner) -> Self {
        Self { client, runner }
    }

    pub fn client(&self) -> &SshClient {
        &self.client
    }

    /// Run a remote shell command
    pub fn exec(&self, step: &str, command: &str, output: OutputMode) -> VpsResult<ExecOutcome> {
        self.run(step, &self.client.command(command), output)
    }

    /// Run a remote shell command, feeding `stdin` to it
    pub fn exec_with_stdin(
        &self,
        step: &str,
        command: &str,
        stdin: &str,
        output: OutputMode,
    ) -> VpsResult<ExecOutcome> {
        self.run(step, &self.client.command(command).stdin(stdin), output)
    }

    /// Copy one local file into a remote directory; output is captured
    pub fn copy(&self, step: &str, local: &Path, remote_dir: &str) -> VpsResult<ExecOutcome> {
        self.run(step, &self.client.copy(local, remote_dir), OutputMode::Capture)
    }

    /// Mirror a local directory with rsync
    pub fn mirror(
        &self,
        step: &str,
        local_dir: &Path,
        remote_dir: &str,
        include: &str,
        output: OutputMode,
    ) -> VpsResult<ExecOutcome> {
        self.run(
            step,
            &self.client.mirror(local_dir, remote_dir, include),
            output,
        )
    }

    fn run(&self, step: &str, invocation: &Invocation, output: OutputMode) -> VpsResult<ExecOutcome> {
        let outcome = self.runner.run(invocation, output)?;
        if outcome.is_success() {
            return Ok(outcome);
        }
        Err(VpsError::RemoteFailed {
            step: step.to_string(),
            code: outcome.code,
            stderr: outcome.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::runner::RecordingRunner;
    use std::path::PathBuf;

    #[test]
    fn exec_success_returns_outcome() {
        let runner = RecordingRunner::new();
        let exec = RemoteExecutor::new(SshClient::new("root@host"), &runner);
        let outcome = exec.exec("status", "pm2 status", OutputMode::Inherit).unwrap();
        assert!(outcome.is_success());

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].last_arg(), Some("pm2 status"));
        assert_eq!(runner.modes(), vec![OutputMode::Inherit]);
    }

    #[test]
    fn non_zero_exit_becomes_remote_failed() {
        let runner =
            RecordingRunner::with_outcomes(vec![ExecOutcome::failure(1, "No such file\n")]);
        let exec = RemoteExecutor::new(SshClient::new("root@host"), &runner);
        let err = exec
            .copy("copy a.js", &PathBuf::from("a.js"), "/srv/")
            .unwrap_err();
        match err {
            VpsError::RemoteFailed { step, code, stderr } => {
                assert_eq!(step, "copy a.js");
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "No such file\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(runner.modes(), vec![OutputMode::Capture]);
    }

    #[test]
    fn exec_with_stdin_attaches_data() {
        let runner = RecordingRunner::new();
        let exec = RemoteExecutor::new(SshClient::new("root@host"), &runner);
        exec.exec_with_stdin("db", "read -r X", "secret\n", OutputMode::Capture)
            .unwrap();
        assert_eq!(runner.calls()[0].stdin.as_deref(), Some("secret\n"));
    }
}
