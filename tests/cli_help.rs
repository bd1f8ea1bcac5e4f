use std::process::Command;

#[test]
fn test_no_command_prints_help() {
    let bin = env!("CARGO_BIN_EXE_vpsctl");

    let output = Command::new(bin).env("NO_COLOR", "1").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for sub in ["deploy", "status", "logs", "restart", "npm", "seed", "port", "db", "ssh", "sync-uploads"] {
        assert!(stdout.contains(sub), "help should list '{}'; got:\n{}", sub, stdout);
    }
}

#[test]
fn test_help_mentions_password_variables() {
    let bin = env!("CARGO_BIN_EXE_vpsctl");

    let output = Command::new(bin).arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("VPSCTL_PASSWORD") && stdout.contains("VPSCTL_DB_PASSWORD"),
        "help output should say where passwords come from; got:\n{}",
        stdout
    );
}
