mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Locations searched, in order, when no config path is given.
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "./config.yaml",
    "./imgforged.yaml",
    "~/.config/imgforged/config.yaml",
    "/etc/imgforged/config.yaml",
];

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    parse_config(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Parse configuration from YAML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(content)?;

    if config.folders.is_empty() {
        tracing::warn!("No folders configured, nothing will be processed");
    }

    Ok(config)
}

/// Pick the config file to use: the explicit path, or the first default
/// location that exists.
pub fn resolve_config_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom_path {
        return Ok(path.to_path_buf());
    }

    for path_str in DEFAULT_CONFIG_PATHS {
        let path = PathBuf::from(shellexpand::tilde(path_str).as_ref());
        if path.exists() {
            return Ok(path);
        }
    }

    anyhow::bail!(
        "No config file found (searched: {})",
        DEFAULT_CONFIG_PATHS.join(", ")
    )
}

/// Resolve and load the config file
pub fn find_and_load_config(custom_path: Option<&Path>) -> Result<(PathBuf, Config)> {
    let path = resolve_config_path(custom_path)?;
    let config = load_config(&path)?;
    Ok((path, config))
}
