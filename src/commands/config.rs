//! Config subcommands handler

use std::path::Path;

use anyhow::Result;

use chatposter::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(path: Option<&Path>) -> Result<()> {
    let config = super::load_config(path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print where the configuration is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", Config::config_path()?.display()),
    }
    Ok(())
}
