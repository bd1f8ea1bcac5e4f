use vpsctl::VpsError;

use crate::ui::context::UiContext;
use crate::ui::widgets::r#box::{Box, BoxStyle};

fn format_vps_error(err: &VpsError, supports_color: bool, supports_unicode: bool) -> String {
    let mut b = Box::with_title("ERROR").style(BoxStyle::Error);
    b.add_line(err.to_string());

    if let Some(stderr) = err.remote_stderr() {
        b.add_empty();
        b.add_line(stderr.trim_end().to_string());
    }

    if let Some(fix) = fix_hint(err) {
        b.add_empty();
        b.add_line(format!("FIX: {}", fix));
    }

    b.render(supports_color, supports_unicode)
}

fn fix_hint(err: &VpsError) -> Option<String> {
    match err {
        VpsError::MissingHost => {
            Some("Set `server.host` in vpsctl.toml, or export VPSCTL_HOST.".to_string())
        }
        VpsError::MissingCredential { var } => Some(format!(
            "Export {} in your shell or load it from your secret store.",
            var
        )),
        VpsError::Launch { program, .. } if program == "sshpass" => Some(
            "Install sshpass, or unset VPSCTL_PASSWORD to use key-based authentication."
                .to_string(),
        ),
        VpsError::Launch { program, .. } => Some(format!("Make sure '{}' is on your PATH.", program)),
        VpsError::InvalidSetting { key, .. } => Some(format!("Fix `{}` in your config.", key)),
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error, ui: &UiContext) -> String {
    if let Some(vps) = err.downcast_ref::<VpsError>() {
        return format_vps_error(vps, ui.color, ui.unicode);
    }

    format!("[ERROR] {:#}\n", err)
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    if ui.json {
        let mut output = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        });
        if let Some(stderr) = err.downcast_ref::<VpsError>().and_then(VpsError::remote_stderr) {
            output["stderr"] = serde_json::Value::String(stderr.to_string());
        }
        let _ = crate::ui::json::emit(output);
        return;
    }

    eprint!("{}", format_error(err, ui));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failure_shows_captured_stderr() {
        let err = VpsError::RemoteFailed {
            step: "copy a.js".to_string(),
            code: Some(1),
            stderr: "Permission denied\n".to_string(),
        };
        let rendered = format_vps_error(&err, false, false);
        assert!(rendered.contains("copy a.js failed (exit code 1)"));
        assert!(rendered.contains("Permission denied"));
        assert!(rendered.starts_with('+'));
    }

    #[test]
    fn missing_credential_suggests_export() {
        let err = VpsError::MissingCredential {
            var: "VPSCTL_DB_PASSWORD".to_string(),
        };
        let rendered = format_vps_error(&err, false, true);
        assert!(rendered.contains("FIX: Export VPSCTL_DB_PASSWORD"));
    }

    #[test]
    fn missing_sshpass_suggests_key_auth() {
        let err = VpsError::Launch {
            program: "sshpass".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(fix_hint(&err).unwrap().contains("key-based"));
    }
}
