use vpsctl::config::{ConfigWarning, WarningKind};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub fn render_config_warning(w: &ConfigWarning, ui: &UiContext) -> String {
    let icon = Icon::Warning.colored(ui.color, ui.unicode);
    let location = match w.line {
        Some(line) => format!("{}:{}", w.file.display(), line),
        None => w.file.display().to_string(),
    };

    match w.kind {
        WarningKind::SecretInFile => format!(
            "{} Ignoring credential '{}' in {}\n   Secrets are read from the environment only (VPSCTL_PASSWORD, VPSCTL_DB_PASSWORD).\n",
            icon, w.key, location
        ),
        WarningKind::UnknownKey => {
            let mut out = format!("{} Unknown config key '{}' in {}\n", icon, w.key, location);
            if let Some(suggestion) = &w.suggestion {
                out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
            }
            out
        }
    }
}

pub fn print_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    if ui.json {
        for w in warnings {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "config_warning",
                "kind": match w.kind {
                    WarningKind::UnknownKey => "unknown_key",
                    WarningKind::SecretInFile => "secret_in_file",
                },
                "key": w.key,
                "file": w.file.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            }));
        }
        return;
    }

    for w in warnings {
        eprint!("{}", render_config_warning(w, ui));
    }
}
