//! Process execution boundary
//!
//! Everything that touches the network goes through [`CommandRunner`], so
//! deploy and helper flows can be exercised without a live host.

use std::io::Write;
use std::process::{Command, Stdio};

use super::invocation::Invocation;
use crate::error::{VpsError, VpsResult};

/// Where the child's stdout/stderr go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Stream straight to the operator's terminal
    Inherit,
    /// Collect both streams into the [`ExecOutcome`]
    Capture,
}

/// Exit status and captured streams of one subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// `None` when the child was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutcome {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an [`Invocation`] to completion
pub trait CommandRunner: Send + Sync {
    /// Launch failures are errors; a non-zero exit is a normal outcome.
    fn run(&self, invocation: &Invocation, output: OutputMode) -> VpsResult<ExecOutcome>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, output: OutputMode) -> VpsResult<ExecOutcome> {
        let launch_err = |source| VpsError::Launch {
            program: invocation.program.clone(),
            source,
        };

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        cmd.stdin(if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        match output {
            OutputMode::Inherit => {
                cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
            OutputMode::Capture => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
        }

        let mut child = cmd.spawn().map_err(launch_err)?;

        if let Some(data) = &invocation.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                // A child that exits without reading stdin still has its status collected
                match stdin.write_all(data.as_bytes()) {
                    Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
                    _ => {}
                }
            }
        }

        let out = child.wait_with_output()?;

        Ok(ExecOutcome {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

/// Runner that writes each invocation (redacted) instead of executing it
pub struct DryRunRunner<W: Write + Send> {
    writer: std::sync::Mutex<W>,
}

impl<W: Write + Send> DryRunRunner<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: std::sync::Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> CommandRunner for DryRunRunner<W> {
    fn run(&self, invocation: &Invocation, _output: OutputMode) -> VpsResult<ExecOutcome> {
        if let Ok(mut writer) = self.writer.lock() {
            writeln!(writer, "[dry-run] {}", invocation.display_redacted())?;
        }
        Ok(ExecOutcome::success())
    }
}

/// Records invocations and replays scripted exit codes (0 once exhausted)
#[cfg(test)]
pub(crate) struct RecordingRunner {
    calls: std::sync::Mutex<Vec<(Invocation, OutputMode)>>,
    script: std::sync::Mutex<std::collections::VecDeque<ExecOutcome>>,
}

#[cfg(test)]
impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::with_outcomes(Vec::new())
    }

    pub(crate) fn with_outcomes(outcomes: Vec<ExecOutcome>) -> Self {
        Self {
            calls: std::sync::Mutex::new(Vec::new()),
            script: std::sync::Mutex::new(outcomes.into()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(inv, _)| inv.clone())
            .collect()
    }

    pub(crate) fn modes(&self) -> Vec<OutputMode> {
        self.calls.lock().unwrap().iter().map(|(_, m)| *m).collect()
    }
}

#[cfg(test)]
impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, output: OutputMode) -> VpsResult<ExecOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((invocation.clone(), output));
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(ExecOutcome::success))
    }
}
