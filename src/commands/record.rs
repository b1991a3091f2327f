use crate::commands::save;
use crate::utils::expand_paths;
use crate::{StateContext, output};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Record the current mtime of every path and save the state file.
///
/// Paths that cannot be recorded are reported and skipped; the state file is
/// still written for the rest.
///
/// # Errors
///
/// Returns an error if the state file cannot be loaded or written, or if any
/// path could not be recorded.
pub fn execute(ctx: &StateContext, paths: &[PathBuf], glob: bool) -> Result<()> {
    let mut tracker = ctx.load_tracker()?;
    let targets = expand_paths(paths, glob)?;

    if targets.is_empty() {
        output::info("No paths to record");
        return Ok(());
    }

    let mut failed = 0usize;
    for path in &targets {
        match tracker.record_path(path) {
            Ok(()) => println!("  {} {}", "recorded:".green(), path.display()),
            Err(e) => {
                failed += 1;
                output::warning(&format!("Cannot record {}: {e}", path.display()));
            }
        }
    }

    save(&tracker)?;

    if failed > 0 {
        anyhow::bail!("{failed} of {} path(s) could not be recorded", targets.len());
    }
    output::success(&format!("Recorded {} path(s)", targets.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::TestState;

    fn context(state: &TestState) -> Result<StateContext> {
        StateContext::new_explicit(state.state_file(), state.root().join("config.toml"))
    }

    #[test]
    fn test_record_writes_state() -> Result<()> {
        let state = TestState::new()?;
        let file = state.create_file("etc/foo", 1000)?;
        let ctx = context(&state)?;

        execute(&ctx, &[file.clone()], false)?;

        let tracker = ctx.load_tracker()?;
        assert_eq!(tracker.len(), 1);
        assert!(!tracker.needs_update(&file, false));
        Ok(())
    }

    #[test]
    fn test_record_missing_path_fails_but_saves_rest() -> Result<()> {
        let state = TestState::new()?;
        let file = state.create_file("etc/foo", 1000)?;
        let ctx = context(&state)?;

        let args = [
            file.clone(),
            state.root().join("missing"),
        ];
        assert!(execute(&ctx, &args, false).is_err());

        let tracker = ctx.load_tracker()?;
        assert_eq!(tracker.len(), 1);
        Ok(())
    }

    #[test]
    fn test_record_glob() -> Result<()> {
        let state = TestState::new()?;
        state.create_file("modules/a", 1)?;
        state.create_file("modules/b", 2)?;
        let ctx = context(&state)?;

        let pattern = state.root().join("modules/*");
        execute(&ctx, &[pattern], true)?;

        assert_eq!(ctx.load_tracker()?.len(), 2);
        Ok(())
    }
}
