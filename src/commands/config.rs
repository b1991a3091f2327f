use crate::StateContext;
use anyhow::Result;

/// Print the effective configuration as TOML, followed by the resolved state file.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn execute(ctx: &StateContext) -> Result<()> {
    println!("# config: {}", ctx.config_path.display());
    println!("# state file: {}", ctx.state_file.display());
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}
