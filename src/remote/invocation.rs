//! Parameterized subprocess descriptions
//!
//! An [`Invocation`] is an argument vector, never a local shell string.
//! Extra environment variables and stdin exist only to carry secrets, so
//! both are redacted whenever an invocation is rendered.

use crate::config::REDACTED;

/// One subprocess to run
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Extra environment for the child (secrets only)
    pub env: Vec<(String, String)>,
    /// Data written to the child's stdin (secrets only)
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            stdin: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn stdin(mut self, data: impl Into<String>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// The last argument; for ssh invocations this is the remote command
    pub fn last_arg(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Shell-like rendering with secrets masked, for logs and dry runs
    pub fn display_redacted(&self) -> String {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(k, _)| format!("{}={}", k, REDACTED))
            .collect();
        parts.push(quote_if_needed(&self.program));
        parts.extend(self.args.iter().map(|a| quote_if_needed(a)));
        let mut out = parts.join(" ");
        if self.stdin.is_some() {
            out.push_str(&format!(" <<< {}", REDACTED));
        }
        out
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Invocation")
            .field(&self.display_redacted())
            .finish()
    }
}

/// Quote a string for a POSIX shell (single quotes, `'` escaped)
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Quote only when the string contains characters the shell would interpret
pub fn quote_if_needed(s: &str) -> String {
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./@:+=,%".contains(c));
    if plain {
        s.to_string()
    } else {
        shell_quote(s)
    }
}
