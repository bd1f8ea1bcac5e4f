//! Verbose tracing of subprocess invocations

use vpsctl::remote::{CommandRunner, ExecOutcome, Invocation, OutputMode};
use vpsctl::VpsResult;

use crate::ui::primitives::text::ColoredText;

/// Prints each invocation (redacted) to stderr before delegating.
/// At `-vv` captured stderr of successful steps is echoed too.
pub struct EchoRunner<R> {
    inner: R,
    verbose: u8,
    color: bool,
}

impl<R: CommandRunner> EchoRunner<R> {
    pub fn new(inner: R, verbose: u8, color: bool) -> Self {
        Self {
            inner,
            verbose,
            color,
        }
    }
}

impl<R: CommandRunner> CommandRunner for EchoRunner<R> {
    fn run(&self, invocation: &Invocation, output: OutputMode) -> VpsResult<ExecOutcome> {
        eprintln!(
            "{}",
            ColoredText::dim(format!("$ {}", invocation.display_redacted())).render(self.color)
        );
        let outcome = self.inner.run(invocation, output)?;
        if self.verbose >= 2 && outcome.is_success() && !outcome.stderr.trim().is_empty() {
            eprint!("{}", outcome.stderr);
        }
        Ok(outcome)
    }
}
