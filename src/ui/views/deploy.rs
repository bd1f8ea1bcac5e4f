//! Terminal and NDJSON renderings of deploy events

use std::io::{self, Write};
use std::sync::Mutex;

use vpsctl::{DeployEvent, DeployEventSink};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Human-readable progress, one line per step
pub struct ConsoleDeploySink {
    color: bool,
    unicode: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleDeploySink {
    pub fn stdout(ui: &UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: &UiContext, writer: W) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.color, self.unicode)
    }

    fn render(&self, event: &DeployEvent) -> String {
        match event {
            DeployEvent::Started {
                destination,
                file_count,
            } => format!(
                "{} Deploying {} file{} to {}\n",
                self.icon(Icon::Deploy),
                file_count,
                if *file_count == 1 { "" } else { "s" },
                ColoredText::info(destination).bold().render(self.color)
            ),
            DeployEvent::FileStarted {
                local, remote_dir, ..
            } => format!(
                "{} {} {} {}",
                self.icon(Icon::Progress),
                local.display(),
                self.icon(Icon::Arrow),
                ColoredText::dim(remote_dir).render(self.color)
            ),
            DeployEvent::FileCopied { local, .. } => {
                format!("{} {} deployed", self.icon(Icon::Success), local.display())
            }
            DeployEvent::FileFailed { local, .. } => format!(
                "{} {}",
                self.icon(Icon::Error),
                ColoredText::error(format!("Failed to deploy {}", local.display()))
                    .render(self.color)
            ),
            DeployEvent::RestartStarted { command } => format!(
                "\n{} Restarting application {}",
                self.icon(Icon::Restart),
                ColoredText::dim(format!("({})", command)).render(self.color)
            ),
            DeployEvent::Restarted => {
                format!("{} Application restarted", self.icon(Icon::Success))
            }
            DeployEvent::RestartFailed { error, stderr } => {
                let mut out = format!(
                    "{} {}",
                    self.icon(Icon::Error),
                    ColoredText::error(format!("Restart failed: {}", error)).render(self.color)
                );
                for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                    out.push_str(&format!("\n    {}", line));
                }
                out
            }
            DeployEvent::Completed {
                copied,
                restarted,
                verify_url,
            } => {
                let mut out = if *restarted {
                    format!(
                        "\n{} Deploy complete: {} file{} copied",
                        self.icon(Icon::Done),
                        copied,
                        if *copied == 1 { "" } else { "s" }
                    )
                } else {
                    format!(
                        "\n{} Files copied ({}), but the application was not restarted",
                        self.icon(Icon::Warning),
                        copied
                    )
                };
                if let Some(url) = verify_url {
                    out.push_str(&format!(
                        "\n  Verify: {}",
                        ColoredText::info(url).render(self.color)
                    ));
                }
                out
            }
        }
    }
}

impl DeployEventSink for ConsoleDeploySink {
    fn on_event(&self, event: DeployEvent) {
        let line = self.render(&event);
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

/// Event sink that outputs deploy events as NDJSON
pub struct JsonDeploySink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonDeploySink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

pub fn event_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            destination,
            file_count,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "destination": destination,
            "file_count": file_count,
        }),
        DeployEvent::FileStarted {
            index,
            local,
            remote_dir,
        } => serde_json::json!({
            "event": "file_start",
            "index": index,
            "local": local.display().to_string(),
            "remote_dir": remote_dir,
        }),
        DeployEvent::FileCopied { index, local } => serde_json::json!({
            "event": "file_copied",
            "index": index,
            "local": local.display().to_string(),
        }),
        DeployEvent::FileFailed {
            index,
            local,
            error,
            stderr,
        } => serde_json::json!({
            "event": "file_failed",
            "index": index,
            "local": local.display().to_string(),
            "error": error,
            "stderr": stderr,
        }),
        DeployEvent::RestartStarted { command } => serde_json::json!({
            "event": "restart_start",
            "command": command,
        }),
        DeployEvent::Restarted => serde_json::json!({
            "event": "restarted",
        }),
        DeployEvent::RestartFailed { error, stderr } => serde_json::json!({
            "event": "restart_failed",
            "error": error,
            "stderr": stderr,
        }),
        DeployEvent::Completed {
            copied,
            restarted,
            verify_url,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "copied": copied,
            "restarted": restarted,
            "verify_url": verify_url,
        }),
    }
}

impl DeployEventSink for JsonDeploySink {
    fn on_event(&self, event: DeployEvent) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = crate::ui::json::write_event(&mut *writer, &event_json(&event));
            let _ = writer.flush();
        }
    }
}
