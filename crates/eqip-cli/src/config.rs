//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use eqip_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Pipeline configuration every command runs with
    pub pipeline: PipelineConfig,

    /// File the pipeline configuration came from, if any
    pub source: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Load the pipeline configuration from `path`, or use the defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load the pipeline configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let pipeline = PipelineConfig::from_file(path).map_err(CliError::Config)?;
        Ok(Self {
            pipeline,
            source: Some(path.to_path_buf()),
        })
    }

    /// Render the effective pipeline configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        self.pipeline.to_toml().map_err(CliError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::load(None).unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = Config::load(Some("/nonexistent/eqip.toml"));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_toml_mentions_sections() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[allocation]"));
        assert!(rendered.contains("default_total_shares"));
    }
}
