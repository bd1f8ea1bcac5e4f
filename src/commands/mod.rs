//! Command handlers: wire the loaded config, credentials and runner into
//! the library operations and render the results.

pub mod action;
pub mod deploy;
pub mod uploads;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use vpsctl::remote::DryRunRunner;
use vpsctl::{CommandRunner, Config, Credentials, RemoteExecutor, SshClient, SystemRunner};

use crate::ui::context::UiContext;
use crate::ui::echo::EchoRunner;
use crate::ui::views::config::print_config_warnings;

/// Everything a command needs to talk to the server
pub struct Session {
    pub config: Config,
    pub credentials: Credentials,
    pub cwd: PathBuf,
    runner: Box<dyn CommandRunner>,
}

impl Session {
    pub fn open(config_path: Option<&Path>, dry_run: bool, ui: &UiContext) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let loaded = vpsctl::config::load(config_path, &cwd)?;
        print_config_warnings(&loaded.warnings, ui);

        Ok(Self {
            config: loaded.config,
            credentials: Credentials::from_env(),
            cwd,
            runner: build_runner(dry_run, ui),
        })
    }

    pub fn executor(&self) -> Result<RemoteExecutor<'_>> {
        let client = SshClient::from_config(&self.config, &self.credentials)?;
        Ok(RemoteExecutor::new(client, self.runner.as_ref()))
    }
}

fn build_runner(dry_run: bool, ui: &UiContext) -> Box<dyn CommandRunner> {
    match (dry_run, ui.verbose) {
        (true, 0) => Box::new(DryRunRunner::new(dry_run_writer(ui))),
        (true, v) => Box::new(EchoRunner::new(DryRunRunner::new(dry_run_writer(ui)), v, ui.color)),
        (false, 0) => Box::new(SystemRunner),
        (false, v) => Box::new(EchoRunner::new(SystemRunner, v, ui.color)),
    }
}

/// stdout carries only NDJSON in `--json` mode
fn dry_run_writer(ui: &UiContext) -> Box<dyn Write + Send> {
    if ui.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    }
}
