//! Configuration file management for Portico.
//!
//! Supports reading optional settings from `~/.config/portico/config.toml`.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::registry::DEFAULT_MODEL;

/// Root configuration structure for config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct PorticoConfig {
    /// Model invoked when the user has not picked one.
    #[serde(default = "default_model_id")]
    pub default_model: String,
    /// Whether backend round-trips carry simulated delays.
    #[serde(default = "default_simulate_latency")]
    pub simulate_latency: bool,
    /// Filename prefix for conversation exports.
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
}

impl Default for PorticoConfig {
    fn default() -> Self {
        Self {
            default_model: default_model_id(),
            simulate_latency: default_simulate_latency(),
            export_prefix: default_export_prefix(),
        }
    }
}

fn default_model_id() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_simulate_latency() -> bool {
    true
}

fn default_export_prefix() -> String {
    "aws-bedrock-chat".to_string()
}

/// Loads the configuration file from ~/.config/portico/config.toml
pub fn load_config() -> Result<PorticoConfig, String> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Err(format!(
            "Configuration file not found at: {}",
            config_path.display()
        ));
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        )
    })?;

    toml::from_str(&content).map_err(|e| {
        format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        )
    })
}

/// Loads the configuration, falling back to defaults when the file is absent.
pub fn load_config_or_default() -> PorticoConfig {
    match load_config() {
        Ok(config) => config,
        Err(reason) => {
            tracing::debug!(%reason, "using default configuration");
            PorticoConfig::default()
        }
    }
}

/// Returns the path to the configuration file: ~/.config/portico/config.toml
fn get_config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;
    Ok(home.join(".config").join("portico").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PorticoConfig::default();
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert!(config.simulate_latency);
        assert_eq!(config.export_prefix, "aws-bedrock-chat");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: PorticoConfig = toml::from_str("simulate_latency = false").unwrap();
        assert!(!config.simulate_latency);
        assert_eq!(config.default_model, DEFAULT_MODEL);
    }
}
