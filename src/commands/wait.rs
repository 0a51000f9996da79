//! pixel-wait handler
//!
//! stdout stays empty; stderr gets exactly one line, and only for exit 2.

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;

use crate::application::{WaitQuery, WaitUseCase};
use crate::domain::ports::DeviceConnector;
use crate::domain::value_objects::MatchMode;
use crate::presentation::WaitCli;

/// Exit status for bad usage and unreachable devices
pub const EXIT_USAGE: u8 = 2;

const USAGE_LINE: &str =
    "Usage: pixel-wait <text> [timeout] | pixel-wait --desc <description> [timeout]";

/// What the argument list asks for
#[derive(Debug)]
pub enum WaitInvocation {
    /// Arguments are valid; run the probe
    Run(WaitCli),
    /// `--help` or `--version`; print and exit 0
    Info(clap::Error),
    /// Bad invocation; print this line and exit 2
    Usage(String),
}

pub fn parse_wait_args<I, T>(args: I) -> WaitInvocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match WaitCli::try_parse_from(&args) {
        Ok(cli) => WaitInvocation::Run(cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => WaitInvocation::Info(err),
            ErrorKind::MissingRequiredArgument if args.iter().any(|a| a == "--desc") => {
                WaitInvocation::Usage("Missing search text".to_string())
            }
            ErrorKind::MissingRequiredArgument => WaitInvocation::Usage(USAGE_LINE.to_string()),
            _ => WaitInvocation::Usage(first_line(&err.to_string())),
        },
    }
}

fn first_line(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or("").trim();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

/// Run the probe and return its exit status
pub fn cmd_wait<C: DeviceConnector>(
    cli: &WaitCli,
    use_case: &WaitUseCase<C>,
    stderr: &mut impl Write,
) -> u8 {
    let mode = if cli.desc {
        MatchMode::Description
    } else {
        MatchMode::Text
    };

    let query = match WaitQuery::new(mode, cli.target.as_str(), cli.timeout) {
        Ok(query) => query,
        Err(err) => {
            let _ = writeln!(stderr, "{}", err);
            return EXIT_USAGE;
        }
    };

    let outcome = use_case.execute(&query);
    if let Some(line) = outcome.diagnostic() {
        let _ = writeln!(stderr, "{}", line);
    }
    outcome.exit_code()
}
