use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Defaults loaded from the optional TOML config file; CLI flags always win.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub d0: Option<f64>,
    pub threshold: Option<f64>,
    pub dt: Option<f64>,
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.lyap\config.toml on Windows; ~/.lyap/config.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".lyap").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

pub fn load_defaults(path: &Option<PathBuf>) -> Result<Defaults> {
    // A missing file is not an error; explicit paths that fail to parse are
    let Some(p) = path else { return Ok(Defaults::default()) };
    if !p.exists() {
        return Ok(Defaults::default());
    }
    let text = std::fs::read_to_string(p)
        .with_context(|| format!("Read config file {}", p.display()))?;
    let defaults: Defaults =
        toml::from_str(&text).with_context(|| format!("Parse config file {}", p.display()))?;
    Ok(defaults)
}
