//! Attribution output types
//!
//! An [`Attribution`] is the scorer's answer to "who is responsible for how
//! much of this asset". Its weights sum to 1.0 for a non-empty contributor
//! set and to 0.0 for an empty one.

use crate::contributor::ContributionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default per-type weight for code events
pub const DEFAULT_CODE_WEIGHT: f64 = 0.4;
/// Default per-type weight for design events
pub const DEFAULT_DESIGN_WEIGHT: f64 = 0.3;
/// Default per-type weight for review events
pub const DEFAULT_REVIEW_WEIGHT: f64 = 0.15;
/// Default per-type weight for documentation events
pub const DEFAULT_DOCUMENTATION_WEIGHT: f64 = 0.1;
/// Default per-type weight for testing events
pub const DEFAULT_TESTING_WEIGHT: f64 = 0.05;

/// Tolerance used when checking that weights sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Evidence source the scorer should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionMode {
    /// Contribution events only
    EventsOnly,
    /// Team votes only
    VotesOnly,
    /// Events and votes combined (60/40 when both are present)
    #[default]
    Hybrid,
}

impl AttributionMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributionMode::EventsOnly => "events_only",
            AttributionMode::VotesOnly => "votes_only",
            AttributionMode::Hybrid => "hybrid",
        }
    }

    /// Parse a mode from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "events_only" | "events" => Some(AttributionMode::EventsOnly),
            "votes_only" | "votes" => Some(AttributionMode::VotesOnly),
            "hybrid" => Some(AttributionMode::Hybrid),
            _ => None,
        }
    }
}

impl fmt::Display for AttributionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttributionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid attribution mode: {}", s))
    }
}

fn default_code() -> f64 {
    DEFAULT_CODE_WEIGHT
}
fn default_design() -> f64 {
    DEFAULT_DESIGN_WEIGHT
}
fn default_review() -> f64 {
    DEFAULT_REVIEW_WEIGHT
}
fn default_documentation() -> f64 {
    DEFAULT_DOCUMENTATION_WEIGHT
}
fn default_testing() -> f64 {
    DEFAULT_TESTING_WEIGHT
}

/// Per-type multipliers applied to event base scores
///
/// Passed explicitly to the scorer so alternate tables can be exercised
/// deterministically. Fields omitted from a serialized table take their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionWeights {
    /// Weight for code events
    #[serde(default = "default_code")]
    pub code: f64,
    /// Weight for design events
    #[serde(default = "default_design")]
    pub design: f64,
    /// Weight for review events
    #[serde(default = "default_review")]
    pub review: f64,
    /// Weight for documentation events
    #[serde(default = "default_documentation")]
    pub documentation: f64,
    /// Weight for testing events
    #[serde(default = "default_testing")]
    pub testing: f64,
}

impl Default for ContributionWeights {
    fn default() -> Self {
        Self {
            code: DEFAULT_CODE_WEIGHT,
            design: DEFAULT_DESIGN_WEIGHT,
            review: DEFAULT_REVIEW_WEIGHT,
            documentation: DEFAULT_DOCUMENTATION_WEIGHT,
            testing: DEFAULT_TESTING_WEIGHT,
        }
    }
}

impl ContributionWeights {
    /// Weight for a contribution type
    pub fn weight_for(&self, ty: ContributionType) -> f64 {
        match ty {
            ContributionType::Code => self.code,
            ContributionType::Design => self.design,
            ContributionType::Review => self.review,
            ContributionType::Documentation => self.documentation,
            ContributionType::Testing => self.testing,
        }
    }

    /// Check that every weight is finite and non-negative
    pub fn validate(&self) -> Result<(), String> {
        for ty in ContributionType::ALL {
            let w = self.weight_for(ty);
            if !w.is_finite() || w < 0.0 {
                return Err(format!("weight for '{}' must be a finite non-negative number, got {}", ty, w));
            }
        }
        Ok(())
    }
}

/// One contributor's final attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorAttribution {
    /// Contributor identity
    pub contributor_email: String,

    /// Contributor display name
    pub contributor_name: String,

    /// Final weight in [0, 1]
    pub weight: f64,

    /// Explanation of how the weight was reached
    #[serde(default)]
    pub rationale: String,

    /// Weighted sub-score per contribution type name
    ///
    /// Event scoring fills one key per [`ContributionType`]. Keys outside
    /// that set (e.g. `qualitative_analysis`) are carried through untouched.
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
}

impl ContributorAttribution {
    /// Create an attribution with an empty breakdown
    pub fn new(
        contributor_email: impl Into<String>,
        contributor_name: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            contributor_email: contributor_email.into(),
            contributor_name: contributor_name.into(),
            weight,
            rationale: String::new(),
            breakdown: BTreeMap::new(),
        }
    }
}

/// Result of an attribution run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Asset the run was for, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,

    /// Per-contributor attributions, highest weight first
    pub attributions: Vec<ContributorAttribution>,

    /// Sum of all weights
    pub total_weight: f64,

    /// Which scoring branch ran
    pub methodology: String,

    /// Informative confidence signal in [0, 1]
    pub confidence_score: f64,

    /// Degradations applied while producing this result
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Attribution {
    /// Look up the attribution for a contributor
    pub fn get(&self, email: &str) -> Option<&ContributorAttribution> {
        self.attributions.iter().find(|a| a.contributor_email == email)
    }

    /// Weight for a contributor (0.0 if absent)
    pub fn weight_of(&self, email: &str) -> f64 {
        self.get(email).map(|a| a.weight).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = ContributionWeights::default();
        assert_eq!(weights.weight_for(ContributionType::Code), 0.4);
        assert_eq!(weights.weight_for(ContributionType::Testing), 0.05);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_partial_weights_fill_defaults() {
        let weights: ContributionWeights = serde_json::from_str(r#"{"code": 1.0}"#).unwrap();
        assert_eq!(weights.code, 1.0);
        assert_eq!(weights.design, DEFAULT_DESIGN_WEIGHT);
    }

    #[test]
    fn test_negative_weight_invalid() {
        let weights = ContributionWeights {
            review: -0.1,
            ..ContributionWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(AttributionMode::parse("events-only"), Some(AttributionMode::EventsOnly));
        assert_eq!(AttributionMode::default(), AttributionMode::Hybrid);
        assert!(AttributionMode::parse("oracle").is_none());
    }

    #[test]
    fn test_breakdown_serializes_with_type_names() {
        let mut attribution = ContributorAttribution::new("a@x.io", "A", 1.0);
        attribution.breakdown.insert(ContributionType::Code.to_string(), 0.8);
        let json = serde_json::to_value(&attribution).unwrap();
        assert_eq!(json["breakdown"]["code"], 0.8);
    }

    #[test]
    fn test_breakdown_accepts_free_form_keys() {
        let attribution: ContributorAttribution = serde_json::from_str(
            r#"{"contributor_email": "a@x.io", "contributor_name": "A", "weight": 0.5,
                "rationale": "narrative", "breakdown": {"qualitative_analysis": 0.5}}"#,
        )
        .unwrap();
        assert_eq!(attribution.breakdown["qualitative_analysis"], 0.5);
    }
}
