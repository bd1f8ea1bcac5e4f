#![cfg(unix)]

mod common;

use common::*;

fn deploy_env() -> TestEnv {
    let env = TestEnv::with_config(DEPLOY_CONFIG);
    for file in DEPLOY_FILES {
        env.write_project_file(file, "// content\n");
    }
    env
}

#[test]
fn deploy_copies_files_in_order_then_restarts() {
    let env = deploy_env();

    let result = env.run(&["deploy"]);
    assert!(result.success, "{}", result.combined_output());

    let calls = env.invocations();
    assert_eq!(calls.len(), 4, "{:#?}", calls);
    assert!(calls[0].starts_with("scp "));
    assert!(calls[0].ends_with(" server.js deploy@203.0.113.7:/srv/app"));
    assert!(calls[1].ends_with(" public/app.js deploy@203.0.113.7:/srv/app/public"));
    assert!(calls[2].ends_with(" views/index.html deploy@203.0.113.7:/srv/app/views"));
    assert!(calls[3].starts_with("ssh "));
    assert!(calls[3].ends_with("deploy@203.0.113.7 cd /srv/app && pm2 restart shop"));

    assert!(result.stdout.contains("Deploy complete: 3 files copied"));
    assert!(result.stdout.contains("Verify: https://shop.example.com"));
}

#[test]
fn deploy_stops_at_first_failed_copy() {
    let env = deploy_env();

    let result = env.run_with_env(&["deploy"], &[("FAKE_FAIL_MATCH", "public/app.js")]);
    assert!(!result.success);
    assert_eq!(result.exit_code, 1);

    let calls = env.invocations();
    assert_eq!(calls.len(), 2, "{:#?}", calls);
    assert!(calls.iter().all(|c| c.starts_with("scp ")));
    assert!(
        result.stderr.contains("fake scp failure"),
        "captured stderr should be shown; got:\n{}",
        result.stderr
    );
}

#[test]
fn failed_restart_is_reported_but_deploy_succeeds() {
    let env = deploy_env();

    let result = env.run_with_env(&["deploy"], &[("FAKE_FAIL_MATCH", "pm2 restart")]);
    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.invocations().len(), 4);
    assert!(result.stdout.contains("Restart failed"));
    assert!(result.stdout.contains("fake ssh failure"));
    assert!(result.stdout.contains("not restarted"));
}

#[test]
fn deploy_json_emits_ndjson_events() {
    let env = deploy_env();

    let result = env.run(&["deploy", "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect();
    assert_eq!(events.first().unwrap()["event"], "start");
    assert_eq!(events.first().unwrap()["file_count"], 3);
    let last = events.last().unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["copied"], 3);
    assert_eq!(last["restarted"], true);
}

#[test]
fn password_travels_in_environment_only() {
    let env = deploy_env();
    let secret = "s3cr3t-Pa55";

    let result = env.run_with_env(&["deploy", "-v"], &[("VPSCTL_PASSWORD", secret)]);
    assert!(result.success, "{}", result.combined_output());

    let calls = env.invocations();
    assert!(calls[0].starts_with("sshpass -e scp "));
    assert!(calls.iter().all(|c| !c.contains(secret)));
    assert!(calls.iter().all(|c| !c.contains("BatchMode")));
    assert_eq!(env.sshpass_env().as_deref(), Some(secret));
    assert!(!result.combined_output().contains(secret));
}

#[test]
fn dry_run_prints_invocations_without_running_them() {
    let env = deploy_env();

    let result = env.run_with_env(&["deploy", "--dry-run"], &[("VPSCTL_PASSWORD", "hunter2")]);
    assert!(result.success, "{}", result.combined_output());
    assert!(env.invocations().is_empty());
    assert!(result.stdout.contains("[dry-run] SSHPASS=******** sshpass -e scp"));
    assert!(!result.stdout.contains("hunter2"));
}

#[test]
fn deploy_without_files_is_an_error() {
    let env = TestEnv::with_config(HELPER_CONFIG);

    let result = env.run(&["deploy"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("deploy.files"), "{}", result.stderr);
    assert!(env.invocations().is_empty());
}

#[test]
fn missing_host_is_a_config_error() {
    let env = TestEnv::new();

    let result = env.run(&["status"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("VPSCTL_HOST"), "{}", result.stderr);
    assert!(env.invocations().is_empty());
}

#[test]
fn json_dry_run_keeps_stdout_ndjson() {
    let env = deploy_env();

    let result = env.run(&["deploy", "--json", "--dry-run"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(env.invocations().is_empty());

    for line in result.stdout.lines() {
        assert!(
            serde_json::from_str::<serde_json::Value>(line).is_ok(),
            "non-JSON line on stdout: {}",
            line
        );
    }
    assert!(result.stderr.contains("[dry-run] scp "), "{}", result.stderr);
}
