use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Portship - compile a VFS archive index into a Ninja build graph
#[derive(Parser, Debug)]
#[command(name = "portship")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile an index manifest into a Ninja build file
    Generate {
        /// JSON entry manifest describing the index
        #[arg(short, long)]
        index: PathBuf,

        /// Directory the build file is written into
        #[arg(short, long, default_value = ".")]
        dest: PathBuf,

        /// Config file (defaults to <dest>/portship.toml, then the user config)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rewrite the build file even when its content is unchanged
        #[arg(short, long)]
        force: bool,
    },

    /// Show what would be emitted for each entry without writing anything
    Inspect {
        /// JSON entry manifest describing the index
        #[arg(short, long)]
        index: PathBuf,

        /// Config file (defaults to the user config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
