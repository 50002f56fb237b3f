//! Handler functions for config CLI commands.

use crate::cli::ConfigAction;
use forge_core::{Error, ForgeConfig, Result};
use std::path::Path;

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => {
            let config = ForgeConfig::load(config_path)?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        ConfigAction::Init { force } => {
            let path = ForgeConfig::resolve_config_path(config_path)
                .ok_or_else(|| Error::config("Could not determine config directory"))?;
            cmd_config_init(&path, force)?;
            println!("Created config file at {}", path.display());
            Ok(())
        }
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match ForgeConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist; run `forge config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Write the default configuration to `path`.
pub fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, ForgeConfig::default().to_toml_string()?)?;
    tracing::info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}
