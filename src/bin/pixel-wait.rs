//! pixel-wait - wait for a UI element on the Android device
//!
//! Usage:
//!   pixel-wait <text> [timeout]
//!   pixel-wait --desc <description> [timeout]
//!
//! Exit status: 0 found, 1 timed out, 2 bad usage or device unreachable.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use mesh_deploy::commands::wait::EXIT_USAGE;
use mesh_deploy::commands::{cmd_wait, parse_wait_args, WaitInvocation};
use mesh_deploy::config::Config;
use mesh_deploy::presentation::create_wait_use_case;

fn main() -> ExitCode {
    let cli = match parse_wait_args(std::env::args_os()) {
        WaitInvocation::Run(cli) => cli,
        WaitInvocation::Info(info) => {
            let _ = info.print();
            return ExitCode::SUCCESS;
        }
        WaitInvocation::Usage(line) => {
            eprintln!("{}", line);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match Config::discover(None, &cwd) {
        Ok((config, _warnings)) => config,
        Err(err) => {
            let message = err.to_string();
            eprintln!("{}", message.lines().next().unwrap_or_default());
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let use_case = create_wait_use_case(&config);
    ExitCode::from(cmd_wait(&cli, &use_case, &mut io::stderr()))
}
