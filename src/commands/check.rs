use crate::commands::save;
use crate::utils::expand_paths;
use crate::{StateContext, output};
use anyhow::Result;
use std::path::PathBuf;
use colored::Colorize;
use tracing::{Level, debug, span};

/// Report, for each path, whether it changed since it was last recorded.
///
/// Prints `stale <path>` or `fresh <path>` per path on stdout. With `record`
/// set, stale paths are recorded and the state file is saved.
///
/// Returns whether any path was stale.
///
/// # Errors
///
/// Returns an error if the state file cannot be loaded or written.
pub fn execute(
    ctx: &StateContext,
    paths: &[PathBuf],
    force: bool,
    record: bool,
    glob: bool,
) -> Result<bool> {
    let span = span!(Level::DEBUG, "check", force, record);
    let _guard = span.enter();

    let mut tracker = ctx.load_tracker()?;
    let targets = expand_paths(paths, glob)?;

    let mut any_stale = false;
    let mut recorded = 0usize;

    for path in &targets {
        let stale = tracker.needs_update(path, force);
        debug!(path = %path.display(), stale, "Checked path");

        if !stale {
            println!("{} {}", "fresh".dimmed(), path.display());
            continue;
        }

        any_stale = true;
        println!("{} {}", "stale".yellow().bold(), path.display());

        if record {
            match tracker.record_path(path) {
                Ok(()) => recorded += 1,
                Err(e) => output::warning(&format!("Cannot record {}: {e}", path.display())),
            }
        }
    }

    if record && recorded > 0 {
        save(&tracker)?;
        output::info(&format!("Recorded {recorded} stale path(s)"));
    }

    Ok(any_stale)
}
