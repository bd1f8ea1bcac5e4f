//! Deploy Event Port
//!
//! Observable interface for the deploy flow, so the terminal view and the
//! NDJSON stream share one sequence of events.

use std::path::PathBuf;

/// Event emitted during a deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        destination: String,
        file_count: usize,
    },

    /// Copy of one file started
    FileStarted {
        index: usize,
        local: PathBuf,
        remote_dir: String,
    },

    /// File copied successfully
    FileCopied { index: usize, local: PathBuf },

    /// Copy failed; no further steps run
    FileFailed {
        index: usize,
        local: PathBuf,
        error: String,
        stderr: String,
    },

    /// Restart command started
    RestartStarted { command: String },

    /// Application restarted
    Restarted,

    /// Restart failed; the deploy still completes
    RestartFailed { error: String, stderr: String },

    /// Deploy finished (all copies succeeded)
    Completed {
        copied: usize,
        restarted: bool,
        verify_url: Option<String>,
    },
}

/// Trait for receiving deploy events
pub trait DeployEventSink {
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}

/// Collects events in memory
#[derive(Default)]
pub struct CollectingEventSink {
    events: std::sync::Mutex<Vec<DeployEvent>>,
}

impl CollectingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DeployEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl DeployEventSink for CollectingEventSink {
    fn on_event(&self, event: DeployEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
