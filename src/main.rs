//! Portship CLI - VFS index to Ninja build graph compiler
//!
//! Usage: portship <COMMAND>
//!
//! Commands:
//!   generate  Compile an index manifest into a Ninja build file
//!   inspect   Show what would be emitted for each entry

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use portship::config::Verbosity;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate {
            index,
            dest,
            config,
            force,
        } => commands::generate::cmd_generate(
            index,
            dest,
            config.as_ref(),
            *force,
            cli.json,
            cli.verbose,
        ),
        Commands::Inspect { index, config } => {
            commands::inspect::cmd_inspect(index, config.as_ref(), cli.json, cli.verbose)
        }
    }
}

/// Install the global subscriber; logs go to stderr
///
/// `RUST_LOG` wins, then `-v` flags, then the configured verbosity.
pub fn init_logging(verbose: u8, configured: Verbosity) {
    let level = match verbose {
        0 => configured.filter(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
