//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for evidence validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject evidence that references an unknown contributor instead of
    /// dropping it with a notice
    pub reject_unknown_contributors: bool,

    /// Reject a contributor list with repeated emails instead of keeping
    /// the first occurrence
    pub reject_duplicate_contributors: bool,

    /// Upper bound for a team vote weight
    pub max_vote_weight: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reject_unknown_contributors: false,
            reject_duplicate_contributors: true,
            max_vote_weight: 1.0,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (repair what can be repaired)
    pub fn permissive() -> Self {
        Self {
            reject_unknown_contributors: false,
            reject_duplicate_contributors: false,
            max_vote_weight: 1.0,
        }
    }

    /// Create a strict configuration (every inconsistency is an error)
    pub fn strict() -> Self {
        Self {
            reject_unknown_contributors: true,
            reject_duplicate_contributors: true,
            max_vote_weight: 1.0,
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), String> {
        if !self.max_vote_weight.is_finite() || self.max_vote_weight <= 0.0 {
            return Err(format!(
                "max_vote_weight must be positive, got {}",
                self.max_vote_weight
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(!config.reject_unknown_contributors);
        assert!(config.reject_duplicate_contributors);
        assert_eq!(config.max_vote_weight, 1.0);
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(!config.reject_duplicate_contributors);
    }

    #[test]
    fn test_strict_config() {
        let config = ValidationConfig::strict();
        assert!(config.reject_unknown_contributors);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_vote_ceiling_invalid() {
        let config = ValidationConfig {
            max_vote_weight: 0.0,
            ..ValidationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ValidationConfig =
            serde_json::from_str(r#"{"reject_unknown_contributors": true}"#).unwrap();
        assert!(config.reject_unknown_contributors);
        assert!(config.reject_duplicate_contributors);
    }
}
