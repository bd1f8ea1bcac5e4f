//! vpsctl CLI - deploy to a VPS and run remote maintenance commands
//!
//! Usage: vpsctl <COMMAND>
//!
//! Commands:
//!   deploy        Copy the configured files, then restart the app
//!   status        pm2 process status
//!   logs [N]      Recent pm2 logs
//!   restart       Restart the app
//!   npm <args>    npm in the app directory
//!   seed          npm run seed
//!   port [N]      Is a port listening
//!   db            Database connectivity check
//!   ssh <cmd>     Arbitrary remote command
//!   sync-uploads  Mirror the uploads directory with rsync

use anyhow::Result;
use clap::{CommandFactory, Parser};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use commands::Session;
use ui::context::UiContext;

fn main() {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);

    if let Err(err) = run(cli, &ui) {
        ui::error::print_error(&err, &ui);
        std::process::exit(1);
    }
}

fn run(cli: Cli, ui: &UiContext) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let session = Session::open(cli.config.as_deref(), cli.dry_run, ui)?;

    match command {
        Commands::Deploy => commands::deploy::cmd_deploy(&session, ui),
        Commands::SyncUploads => commands::uploads::cmd_sync_uploads(&session, ui),
        helper => match helper.action() {
            Some(action) => commands::action::cmd_action(&action, &session, ui),
            None => Ok(()),
        },
    }
}
