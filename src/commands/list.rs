use crate::utils::format_mtime;
use crate::{StateContext, output};
use anyhow::Result;
use colored::Colorize;

/// Print every tracked entry as `<timestamp>  <path>`.
///
/// # Errors
///
/// Returns an error if the state file cannot be loaded.
pub fn execute(ctx: &StateContext) -> Result<()> {
    let tracker = ctx.load_tracker()?;

    if tracker.is_empty() {
        output::info(&format!(
            "No tracked paths in {}",
            ctx.state_file.display()
        ));
        return Ok(());
    }

    for entry in tracker.entries() {
        println!(
            "{}  {}",
            format_mtime(entry.mtime).dimmed(),
            entry.path.display()
        );
    }

    output::verbose(&format!("{} tracked path(s)", tracker.len()));
    Ok(())
}
