/// TOML loading and validation.
pub mod parser;

use crate::fs::DEFAULT_DIR_MODE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default directory holding the state file.
pub const DEFAULT_STATE_DIR: &str = "/var/lib/confstate";

/// Default state file name inside the state directory.
pub const DEFAULT_STATE_FILE: &str = "status";

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where and how the state file is kept
    #[serde(default)]
    pub tracking: TrackingConfig,
}

/// The `[tracking]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Directory holding the state file, created on first write
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// State file name inside `state_dir`
    #[serde(default = "default_state_file")]
    pub state_file: String,
    /// Permission bits for a freshly created state directory
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
    /// Resolve symlinks in paths read back from the state file
    #[serde(default)]
    pub canonicalize_on_load: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            state_file: default_state_file(),
            dir_mode: DEFAULT_DIR_MODE,
            canonicalize_on_load: false,
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults if it is absent
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML
    /// - A value fails validation
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        parser::parse_config_file(path)
    }

    /// Full path of the state file
    #[must_use]
    pub fn state_file_path(&self) -> PathBuf {
        self.tracking.state_dir.join(&self.tracking.state_file)
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if TOML serialization fails
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Serde default for `state_dir`
fn default_state_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_DIR)
}

/// Serde default for `state_file`
fn default_state_file() -> String {
    DEFAULT_STATE_FILE.to_string()
}

/// Serde default for `dir_mode`
const fn default_dir_mode() -> u32 {
    DEFAULT_DIR_MODE
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = Config::load(&dir.path().join("config.toml"))?;

        assert_eq!(
            config.state_file_path(),
            PathBuf::from("/var/lib/confstate/status")
        );
        assert_eq!(config.tracking.dir_mode, 0o755);
        assert!(!config.tracking.canonicalize_on_load);
        assert!(!dir.path().join("config.toml").exists());
        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tracking]\nstate_dir = \"/run/confstate\"\n")?;

        let config = Config::load(&path)?;
        assert_eq!(config.state_file_path(), PathBuf::from("/run/confstate/status"));
        assert_eq!(config.tracking.dir_mode, 0o755);
        Ok(())
    }

    #[test]
    fn test_toml_output_reloads() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.tracking.canonicalize_on_load = true;
        std::fs::write(&path, config.to_toml()?)?;

        let loaded = Config::load(&path)?;
        assert!(loaded.tracking.canonicalize_on_load);
        Ok(())
    }
}
