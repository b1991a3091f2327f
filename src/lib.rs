#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # Confstate - Modification-Time Tracker for Configuration Triggers
//!
//! Confstate answers one question for a system-configuration trigger runner:
//! "has this path changed since we last recorded it?" It keeps an index of
//! canonical paths and their observed mtimes and persists it between runs in
//! a small line-oriented text file.
//!
//! ## Architecture
//!
//! - [`state`]: The tracker, its error kinds and the state-file codec
//! - [`fs`]: Filesystem facade the tracker is built on
//! - [`config`]: Configuration parsing and validation
//! - [`commands`]: CLI command implementations
//! - [`output`]: Output formatting and verbosity control
//! - [`utils`]: Utility functions and helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use confstate::StateContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = StateContext::new()?;
//! let mut tracker = ctx.tracker();
//! tracker.load()?;
//!
//! if tracker.needs_update("/usr/share/fonts", false) {
//!     tracker.record_path("/usr/share/fonts")?;
//!     tracker.write()?;
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Filesystem facade consumed by the tracker.
pub mod fs;

/// Output formatting and verbosity control.
pub mod output;

/// Modification-time tracker and its on-disk format.
pub mod state;

/// Utility functions and helpers.
pub mod utils;

#[cfg(test)]
mod test_utils;

use anyhow::{Context, Result};
use state::StateTracker;
use std::path::PathBuf;

/// Current version of the confstate binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to the user config directory.
pub const DEFAULT_CONFIG_PATH: &str = "confstate/config.toml";

/// Central context for all confstate operations.
///
/// Holds the resolved configuration and the state file every command works
/// against.
///
/// # Examples
///
/// ```no_run
/// use confstate::StateContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Create context with default paths
/// let ctx = StateContext::new()?;
///
/// // Create context with explicit paths (for testing)
/// let ctx = StateContext::new_explicit(
///     "/tmp/test_state/status".into(),
///     "/tmp/test_config.toml".into()
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StateContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,

    /// Path to the state file.
    pub state_file: PathBuf,
}

impl StateContext {
    /// Creates a new `StateContext` from the default configuration path.
    ///
    /// `CONFSTATE_CONFIG_PATH` overrides the configuration path and
    /// `CONFSTATE_STATE_DIR` overrides the configured state directory.
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be determined or
    /// the configuration file cannot be parsed.
    pub fn new() -> Result<Self> {
        // Check environment variable for config path first
        let config_path = if let Ok(path) = std::env::var("CONFSTATE_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            let base = dirs::config_dir().context("Could not find configuration directory")?;
            base.join(DEFAULT_CONFIG_PATH)
        };

        let mut config = config::Config::load(&config_path)?;

        // Allow environment variable to override the configured state directory
        if let Ok(dir) = std::env::var("CONFSTATE_STATE_DIR") {
            config.tracking.state_dir = PathBuf::from(dir);
        }

        let state_file = config.state_file_path();
        Ok(Self {
            config_path,
            config,
            state_file,
        })
    }

    /// Creates a new `StateContext` with an explicit state file.
    ///
    /// # Errors
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn new_explicit(state_file: PathBuf, config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)?;
        Ok(Self {
            config_path,
            config,
            state_file,
        })
    }

    /// Point the context at a different state file.
    #[must_use]
    pub fn with_state_file(mut self, state_file: PathBuf) -> Self {
        self.state_file = state_file;
        self
    }

    /// Builds an empty tracker bound to this context's state file.
    #[must_use]
    pub fn tracker(&self) -> StateTracker {
        let mut tracker = StateTracker::new(&self.state_file)
            .with_dir_mode(self.config.tracking.dir_mode);
        tracker.set_canonicalize_on_load(self.config.tracking.canonicalize_on_load);
        tracker
    }

    /// Builds a tracker and loads the state file into it.
    ///
    /// # Errors
    /// Returns an error if the state file exists but cannot be read or parsed.
    pub fn load_tracker(&self) -> Result<StateTracker> {
        let mut tracker = self.tracker();
        tracker
            .load()
            .with_context(|| format!("Failed to load state file {}", self.state_file.display()))?;
        Ok(tracker)
    }
}
