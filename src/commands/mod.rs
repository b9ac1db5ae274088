//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod convert;
pub mod emit;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};

use chatposter::Config;

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}
