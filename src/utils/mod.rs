//! Utility functions shared by the CLI commands.
//!
//! - Tilde expansion for path arguments
//! - Glob expansion for tracked-path patterns
//! - Timestamp formatting for listings

use crate::output;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};

/// Expands a path starting with `~` to the user's home directory.
///
/// # Errors
///
/// Returns an error if the path is empty.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        anyhow::bail!("Path cannot be empty");
    }
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Ok(home.join(&path[2..]));
    }
    Ok(PathBuf::from(path))
}

/// Turn command-line path arguments into concrete paths.
///
/// With `glob` set, each argument is a pattern and expands to its matches in
/// sorted order; a pattern matching nothing contributes nothing. Entries the
/// glob walk cannot read are reported as warnings and skipped. Without it,
/// arguments are taken literally.
///
/// Tilde and glob expansion only apply to arguments that are valid UTF-8.
/// Any other argument is passed through byte for byte.
///
/// # Errors
///
/// Returns an error if an argument is empty or a pattern is invalid.
pub fn expand_paths(args: &[PathBuf], glob: bool) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for arg in args {
        if arg.as_os_str().is_empty() {
            anyhow::bail!("Path cannot be empty");
        }
        let Some(text) = arg.to_str() else {
            paths.push(arg.clone());
            continue;
        };

        let path = expand_tilde(text)?;
        if !glob {
            paths.push(path);
            continue;
        }

        let pattern = path.to_string_lossy();
        let matches =
            glob::glob(&pattern).with_context(|| format!("Invalid glob pattern: {text}"))?;
        let mut expanded = Vec::new();
        for entry in matches {
            match entry {
                Ok(found) => expanded.push(found),
                Err(e) => {
                    output::warning(&format!("Skipping {}: {}", e.path().display(), e.error()));
                }
            }
        }
        expanded.sort();
        paths.extend(expanded);
    }

    Ok(paths)
}

/// Formats seconds since the Unix epoch as an RFC 3339 UTC timestamp.
///
/// Pre-epoch values are shown as the raw number of seconds.
#[must_use]
pub fn format_mtime(mtime: i64) -> String {
    u64::try_from(mtime).map_or_else(
        |_| mtime.to_string(),
        |secs| humantime::format_rfc3339_seconds(UNIX_EPOCH + Duration::from_secs(secs)).to_string(),
    )
}
