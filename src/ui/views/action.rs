use vpsctl::remote::ExecOutcome;
use vpsctl::Action;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Banner printed before an action runs
pub fn render_action_start(action: &Action, remote_command: &str, ui: &UiContext) -> String {
    let mut out = String::new();
    match action {
        Action::Restart => out.push_str(&format!(
            "{} Restarting application...\n",
            Icon::Restart.colored(ui.color, ui.unicode)
        )),
        Action::Seed => out.push_str(&format!(
            "{} Seeding test data...\n",
            Icon::Progress.colored(ui.color, ui.unicode)
        )),
        _ => {}
    }
    out.push_str(&format!(
        "{} Running: {}",
        Icon::Arrow.colored(ui.color, ui.unicode),
        ColoredText::dim(remote_command).render(ui.color)
    ));
    out
}

/// NDJSON event for a finished action (output captured in JSON mode)
pub fn action_json(action: &Action, remote_command: &str, outcome: &ExecOutcome) -> serde_json::Value {
    serde_json::json!({
        "event": "action",
        "command": action.name(),
        "remote_command": remote_command,
        "exit_code": outcome.code,
        "stdout": outcome.stdout,
        "stderr": outcome.stderr,
    })
}
