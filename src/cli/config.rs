// ABOUTME: CLI config command - show, locate or initialise the config file

use super::util::print_json;
use super::{ConfigArgs, OutputFormat};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Execute the config command
#[allow(clippy::unused_async)] // Async for consistency with other CLI commands
pub async fn execute(args: ConfigArgs, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path()?;

    if args.init {
        if init(&path)? {
            println!("Wrote default config to {}", path.display());
        } else {
            println!("Config already exists at {}", path.display());
        }
        return Ok(());
    }

    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Text => {
            let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
            print!("{rendered}");
        }
    }
    Ok(())
}

/// Write the defaults unless a file is already there. Returns whether it wrote.
pub fn init(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    AppConfig::default().save_to(path)?;
    info!("Created config file at {}", path.display());
    Ok(true)
}
