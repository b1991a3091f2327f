//! Filesystem facade consumed by the state tracker.
//!
//! The tracker never touches `std::fs` directly. Everything it needs from the
//! host (path resolution, modification times, existence checks and directory
//! bootstrapping) goes through [`Filesystem`], so tests can substitute a double
//! that injects failures.

use std::fs;
use std::io;
use std::os::unix::fs::{DirBuilderExt, MetadataExt};
use std::path::{Path, PathBuf};

/// Default permission bits for directories created by the tracker.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Narrow view of the filesystem used by [`crate::state::StateTracker`].
pub trait Filesystem {
    /// Resolve `path` to an absolute path with symlinks and `.`/`..` collapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or cannot be resolved.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Modification time of `path` in whole seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be stat'ed.
    fn stat_mtime(&self, path: &Path) -> io::Result<i64>;

    /// Whether `path` currently exists.
    fn exists(&self, path: &Path) -> bool;

    /// Make sure `path` is a directory, creating it with `mode` if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn ensure_directory(&self, path: &Path, mode: u32) -> io::Result<()>;
}

/// The real host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl Filesystem for HostFs {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn stat_mtime(&self, path: &Path) -> io::Result<i64> {
        // MetadataExt::mtime is already signed seconds, so pre-epoch stamps survive
        Ok(fs::metadata(path)?.mtime())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_directory(&self, path: &Path, mode: u32) -> io::Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        fs::DirBuilder::new().recursive(true).mode(mode).create(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn test_canonicalize_resolves_symlinks() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("target.conf");
        fs::write(&target, "x")?;
        let link = dir.path().join("link.conf");
        std::os::unix::fs::symlink(&target, &link)?;

        let fs = HostFs;
        assert_eq!(fs.canonicalize(&link)?, fs.canonicalize(&target)?);
        Ok(())
    }

    #[test]
    fn test_canonicalize_missing_path_fails() {
        let dir = tempdir().unwrap();
        assert!(HostFs.canonicalize(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_stat_mtime_reads_seconds() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("file");
        fs::write(&file, "x")?;
        filetime::set_file_mtime(&file, FileTime::from_unix_time(1000, 500_000_000))?;

        assert_eq!(HostFs.stat_mtime(&file)?, 1000);
        Ok(())
    }

    #[test]
    fn test_ensure_directory_creates_with_mode() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a/b");

        HostFs.ensure_directory(&nested, 0o700)?;
        assert!(nested.is_dir());
        let mode = fs::metadata(&nested)?.permissions().mode() & 0o777;
        assert_eq!(mode & !0o700, 0);

        // Second call is a no-op
        HostFs.ensure_directory(&nested, DEFAULT_DIR_MODE)?;
        Ok(())
    }

    #[test]
    fn test_exists() -> anyhow::Result<()> {
        let dir = tempdir()?;
        assert!(HostFs.exists(dir.path()));
        assert!(!HostFs.exists(&dir.path().join("missing")));
        Ok(())
    }
}
