use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Read, parse and validate a TOML configuration file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or fails validation
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
}

/// Parse TOML text and validate the result
fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    // Validate and return validation errors directly without wrapping
    validate_config(&config)?;
    Ok(config)
}

/// Reject values the tracker cannot work with
fn validate_config(config: &Config) -> Result<()> {
    let tracking = &config.tracking;

    if tracking.state_dir.as_os_str().is_empty() {
        anyhow::bail!("tracking.state_dir cannot be empty");
    }

    if tracking.state_file.is_empty() {
        anyhow::bail!("tracking.state_file cannot be empty");
    }

    if tracking.state_file.contains('/') {
        anyhow::bail!(
            "tracking.state_file must be a file name, not a path: {}",
            tracking.state_file
        );
    }

    if tracking.dir_mode > 0o7777 {
        anyhow::bail!("tracking.dir_mode must be at most 0o7777, got {:o}", tracking.dir_mode);
    }

    Ok(())
}
