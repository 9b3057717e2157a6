//! Config subcommands handler

use anyhow::{Context, Result};

use towr_replay::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print the location of the configuration file.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Create a default configuration file unless one already exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_init() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        println!(
            "Config already exists at {}; no changes made.",
            config_path.display()
        );
        return Ok(());
    }

    Config::default()
        .save_to(&config_path)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!("Created {}", config_path.display());
    Ok(())
}
