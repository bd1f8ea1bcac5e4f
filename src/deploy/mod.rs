//! Push the configured file list, then restart the application
//!
//! Copies run in list order and the first failure aborts the deploy before
//! the restart. A failed restart is reported but does not fail the deploy.

mod events;

pub use events::{CollectingEventSink, DeployEvent, DeployEventSink, NoopEventSink};

use crate::config::Config;
use crate::error::{VpsError, VpsResult};
use crate::remote::{OutputMode, RemoteExecutor};

/// Outcome of a deploy whose copies all succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub copied: usize,
    pub restart: RestartStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartStatus {
    Restarted,
    Failed { error: String, stderr: String },
}

impl DeployReport {
    pub fn restarted(&self) -> bool {
        self.restart == RestartStatus::Restarted
    }
}

/// Remote command executed after the copies: `cd <app> && <restart>`
pub fn restart_command(config: &Config) -> String {
    format!("cd {} && {}", config.app.path, config.restart_command())
}

pub fn run_deploy(
    config: &Config,
    exec: &RemoteExecutor<'_>,
    events: &dyn DeployEventSink,
) -> VpsResult<DeployReport> {
    let files = &config.deploy.files;
    if files.is_empty() {
        return Err(VpsError::InvalidSetting {
            key: "deploy.files".to_string(),
            value: String::new(),
            reason: "no files configured to deploy".to_string(),
        });
    }

    events.on_event(DeployEvent::Started {
        destination: exec.client().destination().to_string(),
        file_count: files.len(),
    });

    for (index, file) in files.iter().enumerate() {
        let remote_dir = config.remote_path(&file.remote_dir);
        events.on_event(DeployEvent::FileStarted {
            index,
            local: file.local.clone(),
            remote_dir: remote_dir.clone(),
        });

        let step = format!("copy {}", file.local.display());
        match exec.copy(&step, &file.local, &remote_dir) {
            Ok(_) => events.on_event(DeployEvent::FileCopied {
                index,
                local: file.local.clone(),
            }),
            Err(err) => {
                events.on_event(DeployEvent::FileFailed {
                    index,
                    local: file.local.clone(),
                    error: err.to_string(),
                    stderr: err.remote_stderr().unwrap_or_default().to_string(),
                });
                return Err(err);
            }
        }
    }

    let command = restart_command(config);
    events.on_event(DeployEvent::RestartStarted {
        command: command.clone(),
    });

    let restart = match exec.exec("restart", &command, OutputMode::Capture) {
        Ok(_) => {
            events.on_event(DeployEvent::Restarted);
            RestartStatus::Restarted
        }
        Err(err) => {
            let error = err.to_string();
            let stderr = err.remote_stderr().unwrap_or_default().to_string();
            events.on_event(DeployEvent::RestartFailed {
                error: error.clone(),
                stderr: stderr.clone(),
            });
            RestartStatus::Failed { error, stderr }
        }
    };

    let report = DeployReport {
        copied: files.len(),
        restart,
    };

    events.on_event(DeployEvent::Completed {
        copied: report.copied,
        restarted: report.restarted(),
        verify_url: config.app.verify_url.clone(),
    });

    Ok(report)
}
