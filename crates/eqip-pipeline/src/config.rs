//! Configuration for the pipeline

use eqip_domain::ownership::{
    DEFAULT_CLIFF_MONTHS, DEFAULT_MONTHS_CONTRIBUTED, DEFAULT_SWEAT_EQUITY_WEIGHT,
    DEFAULT_TOTAL_SHARES, DEFAULT_VESTING_PERIOD_MONTHS,
};
use eqip_domain::{ContributionWeights, KeywordVocabulary};
use eqip_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scoring defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Per-type weights used when a request carries none
    pub weights: ContributionWeights,

    /// Keyword vocabulary for the qualitative scorer
    pub vocabulary: KeywordVocabulary,
}

/// Allocation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Shares issued when a request names no total
    pub default_total_shares: u64,

    /// Labor portion for funding-based splits
    pub default_sweat_equity_weight: f64,

    /// Vesting period used when a request omits it
    pub default_vesting_period_months: f64,

    /// Cliff used when a request omits it
    pub default_cliff_months: f64,

    /// Months assumed for contributors missing from the time data
    pub default_months_contributed: f64,

    /// Fail on an unknown policy type instead of falling back to weighted
    pub strict_policy_types: bool,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            default_total_shares: DEFAULT_TOTAL_SHARES,
            default_sweat_equity_weight: DEFAULT_SWEAT_EQUITY_WEIGHT,
            default_vesting_period_months: DEFAULT_VESTING_PERIOD_MONTHS,
            default_cliff_months: DEFAULT_CLIFF_MONTHS,
            default_months_contributed: DEFAULT_MONTHS_CONTRIBUTED,
            strict_policy_types: false,
        }
    }
}

/// Configuration for the Pipeline
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Scoring defaults
    pub scoring: ScoringConfig,

    /// Allocation defaults
    pub allocation: AllocationConfig,

    /// Evidence validation rules
    pub validation: ValidationConfig,
}

impl PipelineConfig {
    /// Strict preset: unknown policies and unknown contributors are errors
    pub fn strict() -> Self {
        Self {
            allocation: AllocationConfig {
                strict_policy_types: true,
                ..AllocationConfig::default()
            },
            validation: ValidationConfig::strict(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.scoring.weights.validate()?;
        self.scoring.vocabulary.validate()?;
        self.validation.validate()?;

        let alloc = &self.allocation;
        if alloc.default_total_shares == 0 {
            return Err("default_total_shares must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&alloc.default_sweat_equity_weight) {
            return Err("default_sweat_equity_weight must be in [0, 1]".to_string());
        }
        if !alloc.default_vesting_period_months.is_finite() || alloc.default_vesting_period_months <= 0.0 {
            return Err("default_vesting_period_months must be positive".to_string());
        }
        if !alloc.default_cliff_months.is_finite() || alloc.default_cliff_months < 0.0 {
            return Err("default_cliff_months cannot be negative".to_string());
        }
        if !alloc.default_months_contributed.is_finite() || alloc.default_months_contributed < 0.0 {
            return Err("default_months_contributed cannot be negative".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
