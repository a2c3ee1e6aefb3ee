use std::{fs, path::Path};

use anyhow::{Context, Result};
use glade_core::SessionConfig;

/// Reads a session configuration from a TOML file.
///
/// Every key is optional; missing keys keep their defaults.
pub(crate) fn load(path: &Path) -> Result<SessionConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse(contents: &str) -> Result<SessionConfig> {
    let config: SessionConfig = toml::from_str(contents).context("invalid TOML session config")?;
    Ok(config)
}
