pub mod calibrate;
pub mod config;
pub mod measure;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use feedwatch_core::config::MonitorConfig;

/// Read a TOML config file, or fall back to defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<MonitorConfig> {
    let Some(path) = path else {
        return Ok(MonitorConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid config {}", path.display()))
}
