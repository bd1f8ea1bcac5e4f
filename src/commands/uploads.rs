use anyhow::Result;
use vpsctl::{sync_uploads, OutputMode};

use crate::commands::Session;
use crate::ui::context::UiContext;
use crate::ui::views::uploads::{render_counted, render_synced, uploads_json};

pub fn cmd_sync_uploads(session: &Session, ui: &UiContext) -> Result<()> {
    let exec = session.executor()?;
    let output = if ui.json {
        OutputMode::Capture
    } else {
        OutputMode::Inherit
    };

    let report = sync_uploads(&session.config, &session.cwd, &exec, output, |count| {
        if !ui.json {
            println!("{}", render_counted(count, &session.config.uploads.include, ui));
        }
    })?;

    if ui.json {
        crate::ui::json::emit(uploads_json(&report))?;
    } else {
        println!("{}", render_synced(&report, ui));
    }
    Ok(())
}
