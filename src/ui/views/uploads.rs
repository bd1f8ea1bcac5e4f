use vpsctl::UploadsReport;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_counted(count: usize, include: &str, ui: &UiContext) -> String {
    format!(
        "{} Found {} local file{} matching {}",
        Icon::Progress.colored(ui.color, ui.unicode),
        count,
        if count == 1 { "" } else { "s" },
        ColoredText::dim(include).render(ui.color)
    )
}

pub fn render_synced(report: &UploadsReport, ui: &UiContext) -> String {
    format!(
        "{} Uploads synced to {}",
        Icon::Success.colored(ui.color, ui.unicode),
        ColoredText::info(&report.remote_dir).render(ui.color)
    )
}

pub fn uploads_json(report: &UploadsReport) -> serde_json::Value {
    serde_json::json!({
        "event": "complete",
        "command": "sync-uploads",
        "matching_files": report.matching_files,
        "remote_dir": report.remote_dir,
    })
}
