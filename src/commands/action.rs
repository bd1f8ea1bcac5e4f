use anyhow::Result;
use vpsctl::{run_action, Action, OutputMode};

use crate::commands::Session;
use crate::ui::context::UiContext;
use crate::ui::views::action::{action_json, render_action_start};

/// Run one helper action. Text mode streams remote output straight to the
/// terminal; JSON mode captures it into a single event.
pub fn cmd_action(action: &Action, session: &Session, ui: &UiContext) -> Result<()> {
    let remote_command = action.remote_command(&session.config)?;
    let exec = session.executor()?;

    if ui.json {
        let outcome = run_action(
            action,
            &session.config,
            &session.credentials,
            &exec,
            OutputMode::Capture,
        )?;
        crate::ui::json::emit(action_json(action, &remote_command, &outcome))?;
        return Ok(());
    }

    println!("{}", render_action_start(action, &remote_command, ui));
    run_action(
        action,
        &session.config,
        &session.credentials,
        &exec,
        OutputMode::Inherit,
    )?;
    Ok(())
}
