//! Shared fixtures for unit tests.

/// Temporary state layouts and filesystem doubles
#[cfg(test)]
pub mod fixtures {
    use crate::fs::{Filesystem, HostFs};
    use crate::state::StateTracker;
    use anyhow::Result;
    use filetime::FileTime;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Temporary directory with a `state/` subdirectory for the state file
    pub struct TestState {
        /// Root of the scratch tree
        pub temp_dir: TempDir,
        /// Directory holding the state file
        pub state_dir: PathBuf,
    }

    impl TestState {
        /// Create a fresh scratch tree
        pub fn new() -> Result<Self> {
            let temp_dir = tempfile::tempdir()?;
            let state_dir = temp_dir.path().join("state");

            Ok(Self {
                temp_dir,
                state_dir,
            })
        }

        /// Root of the scratch tree
        pub fn root(&self) -> &Path {
            self.temp_dir.path()
        }

        /// Path of the state file
        pub fn state_file(&self) -> PathBuf {
            self.state_dir.join("status")
        }

        /// Empty tracker bound to the state file
        pub fn tracker(&self) -> StateTracker {
            StateTracker::new(self.state_file())
        }

        /// Create `name` (and its parents) with the given mtime
        pub fn create_file(&self, name: &str, mtime: i64) -> Result<PathBuf> {
            let path = self.temp_dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, name)?;
            self.set_mtime(&path, mtime)?;
            Ok(path)
        }

        /// Set the mtime of `path` in whole seconds
        pub fn set_mtime(&self, path: &Path, mtime: i64) -> Result<()> {
            filetime::set_file_mtime(path, FileTime::from_unix_time(mtime, 0))?;
            Ok(())
        }

        /// Replace the state file contents
        pub fn write_state(&self, contents: &str) -> Result<()> {
            fs::create_dir_all(&self.state_dir)?;
            fs::write(self.state_file(), contents)?;
            Ok(())
        }
    }

    /// Host filesystem that fails `stat_mtime` for selected paths.
    #[derive(Debug, Clone, Default)]
    pub struct FaultyFs {
        /// Paths whose stat fails
        failing: Rc<RefCell<HashSet<PathBuf>>>,
    }

    impl FaultyFs {
        /// Make `stat_mtime` fail for `path` from now on
        pub fn fail_stat(&self, path: &Path) {
            self.failing.borrow_mut().insert(path.to_path_buf());
        }
    }

    impl Filesystem for FaultyFs {
        fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
            HostFs.canonicalize(path)
        }

        fn stat_mtime(&self, path: &Path) -> io::Result<i64> {
            if self.failing.borrow().contains(path) {
                return Err(io::Error::other("injected stat failure"));
            }
            HostFs.stat_mtime(path)
        }

        fn exists(&self, path: &Path) -> bool {
            HostFs.exists(path)
        }

        fn ensure_directory(&self, path: &Path, mode: u32) -> io::Result<()> {
            HostFs.ensure_directory(path, mode)
        }
    }
}
