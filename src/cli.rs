//! Command-line interface definitions for confstate.
//!
//! The CLI definitions are shared between the main binary and build tools (like xtask)
//! for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes,
//! so we allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for confstate.
#[derive(Parser)]
#[command(
    name = "confstate",
    version = crate::VERSION,
    about = "Track file modification times for configuration triggers",
    long_about = "Remembers the modification time of registered paths across runs and reports \
                  whether a path changed since it was last recorded"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use this state file instead of the configured one
    #[arg(long, global = true, env = "CONFSTATE_STATE_FILE")]
    pub state_file: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Record the current modification time of paths
    Record {
        /// Paths to record
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Treat paths as glob patterns
        #[arg(short, long)]
        glob: bool,
    },

    /// Report whether paths changed since they were recorded
    Check {
        /// Paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report every existing path as stale
        #[arg(short, long)]
        force: bool,

        /// Record stale paths and save the state file
        #[arg(short, long)]
        record: bool,

        /// Treat paths as glob patterns
        #[arg(short, long)]
        glob: bool,

        /// Exit with status 1 when no path is stale
        #[arg(long)]
        exit_code: bool,
    },

    /// List tracked paths and their recorded modification times
    List,

    /// Print the effective configuration
    Config,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
