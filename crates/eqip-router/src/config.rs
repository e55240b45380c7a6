//! Configuration file parsing for the Router.
//!
//! Loads the bind address and port plus an optional `[pipeline]` table
//! holding the scoring, allocation and validation defaults.

use eqip_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Router configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Router configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Pipeline defaults
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: RouterConfig = toml::from_str(contents)?;

        if config.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address cannot be empty".to_string()));
        }
        config.pipeline.validate().map_err(ConfigError::Invalid)?;

        Ok(config)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_bind_addr() {
        let config = RouterConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000

            [pipeline.allocation]
            default_total_shares = 10000
            strict_policy_types = true
        "#;

        let config = RouterConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.pipeline.allocation.default_total_shares, 10_000);
        assert!(config.pipeline.allocation.strict_policy_types);
    }

    #[test]
    fn test_invalid_pipeline_section() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000

            [pipeline.allocation]
            default_sweat_equity_weight = 2.0
        "#;

        assert!(matches!(
            RouterConfig::from_toml(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_port() {
        assert!(matches!(
            RouterConfig::from_toml(r#"bind_address = "0.0.0.0""#),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
