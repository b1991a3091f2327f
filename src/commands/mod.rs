//! Command implementations for the confstate CLI.
//!
//! Each command loads the tracker through a [`crate::StateContext`], performs
//! its work and, where it mutates state, writes the state file back.

/// `confstate check`
pub mod check;
/// `confstate config`
pub mod config;
/// `confstate list`
pub mod list;
/// `confstate record`
pub mod record;

use crate::output;
use crate::state::{StateTracker, WriteStats};
use anyhow::{Context, Result};

/// Persist the tracker, reporting how many records were written.
///
/// # Errors
///
/// Returns an error if the state file cannot be written.
pub fn save(tracker: &StateTracker) -> Result<WriteStats> {
    let stats = tracker.write().with_context(|| {
        format!(
            "Failed to write state file {}",
            tracker.state_file().display()
        )
    })?;

    if stats.pruned > 0 {
        output::verbose(&format!(
            "Pruned {} vanished path(s) from state",
            stats.pruned
        ));
    }
    output::verbose(&format!(
        "Wrote {} record(s) to {}",
        stats.written,
        tracker.state_file().display()
    ));
    Ok(stats)
}
