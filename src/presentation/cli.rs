//! CLI Argument Parsing
//!
//! Both binaries are defined here with clap derive.
//!
//! - `mesh-deploy`: global flags (--json, --color, --verbose, --config) are
//!   inherited by all subcommands
//! - `pixel-wait`: positional target and timeout, exit status is the result

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::wait::timeout_from_secs;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// mesh-deploy - idempotent deployment for the mesh relay host
#[derive(Parser, Debug)]
#[command(name = "mesh-deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows unchanged artifacts)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./mesh.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy scripts, units and drop-ins to the relay host
    Deploy {
        /// SSH destination (overrides host.destination)
        #[arg(long)]
        host: Option<String>,

        /// Directory holding the artifact sources (overrides source.dir)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Dry run - compare only, write nothing and run no actions
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the artifact table and cascade rules
    Manifest,
}

/// pixel-wait - wait for a UI element on the Android device
///
/// Exits 0 when the element appears, 1 when the timeout elapses,
/// 2 on bad usage or when the device is unreachable.
#[derive(Parser, Debug)]
#[command(name = "pixel-wait")]
#[command(version, about, long_about = None)]
#[command(override_usage = "pixel-wait <text> [timeout]\n       pixel-wait --desc <description> [timeout]")]
pub struct WaitCli {
    /// Match the accessibility description instead of the visible text
    #[arg(long)]
    pub desc: bool,

    /// Text (or description) to wait for
    pub target: String,

    /// Seconds to wait before giving up [default: 10]
    #[arg(value_parser = parse_timeout, allow_negative_numbers = true)]
    pub timeout: Option<f64>,
}

fn parse_timeout(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", s))?;
    timeout_from_secs(secs).map_err(|e| e.to_string())?;
    Ok(secs)
}
