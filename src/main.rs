//! mesh-deploy CLI
//!
//! Usage: mesh-deploy [--json] [-v] [--color WHEN] [--config PATH] <COMMAND>
//!
//! Commands:
//!   deploy    Deploy scripts, units and drop-ins to the relay host
//!   manifest  Show the artifact table and cascade rules

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use mesh_deploy::commands::{cmd_deploy, cmd_manifest};
use mesh_deploy::config::Config;
use mesh_deploy::presentation::{Cli, Commands};
use mesh_deploy::ui::{format_error, Icon, UiContext};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);

    match run(cli, &ui) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", format_error(&err, ui.color, ui.unicode));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, ui: &UiContext) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let (config, warnings) = Config::discover(cli.config.as_deref(), &cwd)?;
    for warning in &warnings {
        eprintln!("{} {}", Icon::Warning.colored(ui.color, ui.unicode), warning);
    }

    match cli.command {
        Commands::Deploy {
            host,
            source,
            dry_run,
        } => {
            cmd_deploy(config, ui, host, source, dry_run)?;
        }
        Commands::Manifest => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            cmd_manifest(&config, ui.json, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
