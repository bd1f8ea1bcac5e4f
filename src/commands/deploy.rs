use anyhow::Result;
use vpsctl::{run_deploy, DeployEventSink};

use crate::commands::Session;
use crate::ui::context::UiContext;
use crate::ui::views::deploy::{ConsoleDeploySink, JsonDeploySink};

/// A failed restart is reported by the sink and still exits 0
pub fn cmd_deploy(session: &Session, ui: &UiContext) -> Result<()> {
    let exec = session.executor()?;
    let sink: Box<dyn DeployEventSink> = if ui.json {
        Box::new(JsonDeploySink::stdout())
    } else {
        Box::new(ConsoleDeploySink::stdout(ui))
    };

    run_deploy(&session.config, &exec, sink.as_ref())?;
    Ok(())
}
