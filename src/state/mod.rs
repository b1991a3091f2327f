//! Persistent modification-time tracker.
//!
//! [`StateTracker`] remembers the mtime each registered path had when it was
//! last recorded and answers whether a path has changed since. The set is
//! persisted to a single line-oriented text file (see [`format`]).
//!
//! A typical run looks like:
//!
//! ```no_run
//! use confstate::state::StateTracker;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut tracker = StateTracker::new("/var/lib/confstate/status");
//! tracker.load()?;
//!
//! if tracker.needs_update("/lib/modules/6.1.0", false) {
//!     // ... run the trigger ...
//!     tracker.record_path("/lib/modules/6.1.0")?;
//! }
//!
//! tracker.write()?;
//! # Ok(())
//! # }
//! ```

/// Error kinds raised by load, write and record.
pub mod error;
/// State-file line codec.
pub mod format;

pub use error::{ParseReason, StateError};

use crate::fs::{DEFAULT_DIR_MODE, Filesystem, HostFs};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span, warn};

/// A tracked path and the mtime observed when it was last recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Canonical absolute path
    pub path: PathBuf,
    /// Seconds since the Unix epoch
    pub mtime: i64,
}

/// Outcome of a successful [`StateTracker::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Records merged into the tracker
    pub merged: usize,
    /// Records dropped because their path no longer exists
    pub dropped: usize,
}

/// Outcome of a successful [`StateTracker::write`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Records written to the state file
    pub written: usize,
    /// Entries skipped because their path no longer exists
    pub pruned: usize,
}

/// In-memory set of tracked paths bound to a state file on disk.
///
/// Entries are unique by exact path bytes. `/etc/./foo` and `/etc/foo` are
/// different keys even though they name the same file.
#[derive(Debug)]
pub struct StateTracker<F: Filesystem = HostFs> {
    /// File the set is loaded from and written to
    state_file: PathBuf,
    /// Tracked entries keyed by raw path bytes
    entries: HashMap<OsString, Entry>,
    /// Host access
    fs: F,
    /// Mode for a state directory created by `write`
    dir_mode: u32,
    /// Resolve loaded paths before merging them
    canonicalize_on_load: bool,
}

impl StateTracker<HostFs> {
    /// Create an empty tracker bound to `state_file` on the host filesystem.
    #[must_use]
    pub fn new(state_file: impl Into<PathBuf>) -> Self {
        Self::with_filesystem(state_file, HostFs)
    }
}

impl<F: Filesystem> StateTracker<F> {
    /// Create an empty tracker that reaches the filesystem through `fs`.
    #[must_use]
    pub fn with_filesystem(state_file: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            state_file: state_file.into(),
            entries: HashMap::new(),
            fs,
            dir_mode: DEFAULT_DIR_MODE,
            canonicalize_on_load: false,
        }
    }

    /// Permission bits used when `write` has to create the state directory.
    #[must_use]
    pub const fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    /// Re-canonicalize paths read by `load` before merging them.
    ///
    /// Off by default: loaded paths are stored exactly as written in the file.
    pub fn set_canonicalize_on_load(&mut self, enabled: bool) {
        self.canonicalize_on_load = enabled;
    }

    /// Path of the bound state file.
    #[must_use]
    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Number of tracked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry whose path bytes equal `path` exactly.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&Entry> {
        self.entries.get(path.as_os_str())
    }

    /// All entries, sorted by path bytes.
    #[must_use]
    pub fn entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.path.as_os_str().as_bytes().cmp(b.path.as_os_str().as_bytes()));
        entries
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Insert a new entry or overwrite the mtime of an existing one.
    fn put_entry(&mut self, path: PathBuf, mtime: i64) {
        match self.entries.get_mut(path.as_os_str()) {
            Some(entry) => entry.mtime = mtime,
            None => {
                self.entries
                    .insert(path.as_os_str().to_os_string(), Entry { path, mtime });
            }
        }
    }

    /// Register interest in `path` with its current on-disk mtime.
    ///
    /// The tracker is left untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] if the path cannot be canonicalized or stat'ed.
    pub fn record_path(&mut self, path: impl AsRef<Path>) -> Result<(), StateError> {
        let path = path.as_ref();
        let canonical = self
            .fs
            .canonicalize(path)
            .map_err(|e| StateError::io("canonicalize", path, e))?;
        let mtime = self
            .fs
            .stat_mtime(&canonical)
            .map_err(|e| StateError::io("stat", &canonical, e))?;

        debug!(path = %canonical.display(), mtime, "Recorded path");
        self.put_entry(canonical, mtime);
        Ok(())
    }

    /// Whether work keyed on `path` should re-run.
    ///
    /// Nonexistent paths never need an update. Unknown paths, paths that
    /// cannot be stat'ed and `force` all answer `true`. Otherwise the path
    /// is stale only if the stored mtime is strictly older than the
    /// on-disk one.
    pub fn needs_update(&self, path: impl AsRef<Path>, force: bool) -> bool {
        let path = path.as_ref();
        let Ok(canonical) = self.fs.canonicalize(path) else {
            return false;
        };

        let Some(entry) = self.entries.get(canonical.as_os_str()) else {
            return true;
        };

        let mtime = match self.fs.stat_mtime(&canonical) {
            Ok(mtime) => mtime,
            Err(e) => {
                debug!(path = %canonical.display(), error = %e, "stat failed, assuming stale");
                return true;
            }
        };

        force || entry.mtime < mtime
    }

    /// Persist the tracked set, skipping entries whose path has disappeared.
    ///
    /// The file is truncated and rewritten in place.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] if the state directory cannot be created,
    /// or the file cannot be opened or written.
    pub fn write(&self) -> Result<WriteStats, StateError> {
        let span = span!(Level::DEBUG, "write_state", file = %self.state_file.display());
        let _guard = span.enter();

        if let Some(parent) = self.state_file.parent()
            && !parent.as_os_str().is_empty()
        {
            self.fs
                .ensure_directory(parent, self.dir_mode)
                .map_err(|e| StateError::io("mkdir", parent, e))?;
        }

        let file = File::create(&self.state_file)
            .map_err(|e| StateError::io("open", &self.state_file, e))?;
        let mut out = BufWriter::new(file);
        let write_err = |e: io::Error| StateError::io("write", &self.state_file, e);

        format::write_header(&mut out).map_err(write_err)?;

        let mut stats = WriteStats::default();
        for entry in self.entries() {
            if !self.fs.exists(&entry.path) {
                debug!(path = %entry.path.display(), "Pruning vanished path");
                stats.pruned += 1;
                continue;
            }
            format::write_record(&mut out, entry).map_err(write_err)?;
            stats.written += 1;
        }

        out.flush().map_err(write_err)?;
        debug!(written = stats.written, pruned = stats.pruned, "State written");
        Ok(stats)
    }

    /// Merge the state file into the tracked set.
    ///
    /// A missing state file is the initial state and loads nothing. Records
    /// whose path no longer exists are dropped. The last record for a path
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] if the file exists but cannot be opened or
    /// read, and [`StateError::Parse`] on the first malformed line. Either
    /// error raised while reading leaves the tracker empty.
    pub fn load(&mut self) -> Result<LoadStats, StateError> {
        let span = span!(Level::DEBUG, "load_state", file = %self.state_file.display());
        let _guard = span.enter();

        let file = match File::open(&self.state_file) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No state file yet");
                return Ok(LoadStats::default());
            }
            Err(e) => return Err(StateError::io("open", &self.state_file, e)),
        };

        match self.merge_from(BufReader::new(file)) {
            Ok(stats) => {
                debug!(merged = stats.merged, dropped = stats.dropped, "State loaded");
                Ok(stats)
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse state, discarding all entries");
                self.entries.clear();
                Err(e)
            }
        }
    }

    /// Merge every record read from `reader`, stopping at the first bad line.
    fn merge_from<R: BufRead>(&mut self, reader: R) -> Result<LoadStats, StateError> {
        let mut stats = LoadStats::default();

        for (idx, line) in reader.split(b'\n').enumerate() {
            let line = line.map_err(|e| StateError::io("read", &self.state_file, e))?;
            let Some(entry) = format::parse_line(idx + 1, &line)? else {
                continue;
            };

            if !self.fs.exists(&entry.path) {
                debug!(path = %entry.path.display(), "Dropping record for vanished path");
                stats.dropped += 1;
                continue;
            }

            let path = if self.canonicalize_on_load {
                self.fs.canonicalize(&entry.path).unwrap_or(entry.path)
            } else {
                entry.path
            };
            self.put_entry(path, entry.mtime);
            stats.merged += 1;
        }

        Ok(stats)
    }
}
