//! User-facing output for the confstate CLI.
//!
//! Status messages go to stderr so that stdout only carries command results
//! (`stale`/`fresh` verdicts, entry listings) and stays scriptable.

use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

/// How much the CLI says on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `--quiet`: warnings and errors only
    Quiet = 0,
    /// Progress and summaries
    Normal = 1,
    /// `--verbose`: also write/prune counts
    Verbose = 2,
}

impl Verbosity {
    /// Pick a level from the global `--quiet`/`--verbose` flags.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

/// Process-wide level, set once from the command line
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Set the level every helper below checks.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Current level
fn verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// Final summary of a command that changed state. Hidden by `--quiet`.
pub fn success(message: &str) {
    if verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.green());
}

/// Fatal error, shown at every level.
pub fn error(message: &str) {
    eprintln!("{}", message.red().bold());
}

/// A path was skipped; shown at every level.
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// Nothing-to-do notes. Hidden by `--quiet`.
pub fn info(message: &str) {
    if verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// Bookkeeping detail, only with `--verbose`.
pub fn verbose(message: &str) {
    if verbosity() != Verbosity::Verbose {
        return;
    }
    eprintln!("{}", message.dimmed());
}
