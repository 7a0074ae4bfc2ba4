//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => {
            let message = init_config(path, force, formatter)?;
            println!("{}", message);
        }
    }
    Ok(())
}

/// Write a default config file unless one exists (or `force` is set).
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<String> {
    if path.exists() && !force {
        return Ok(formatter.warning(&format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(path)?;
    Ok(formatter.success(&format!("Wrote default configuration to {}", path.display())))
}
