//! Request and response types for the pipeline
//!
//! Field names match the JSON shapes existing consumers already send and
//! read (`contribution_events`, `team_votes`, `attribution_weights`,
//! `policy_type`, `policy_params`).

use eqip_domain::{
    Attribution, AttributionMode, ContributionEvent, ContributionWeights, Contributor,
    ContributorAttribution, OwnershipArrangement, QualitativeDescription, TeamVote,
};
use eqip_gatekeeper::EvidenceBundle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

fn default_policy_type() -> String {
    "weighted".to_string()
}

/// Request to compute an attribution from events and votes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributionRequest {
    /// Asset the attribution is for, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,

    /// Contributors taking part
    #[serde(default)]
    pub contributors: Vec<Contributor>,

    /// Contribution events
    #[serde(default, alias = "events")]
    pub contribution_events: Vec<ContributionEvent>,

    /// Team votes
    #[serde(default, alias = "votes")]
    pub team_votes: Vec<TeamVote>,

    /// Evidence source to score from
    #[serde(default)]
    pub mode: AttributionMode,

    /// Per-type weights; the configured table is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ContributionWeights>,
}

impl AttributionRequest {
    pub(crate) fn bundle(&self) -> EvidenceBundle {
        EvidenceBundle {
            contributors: self.contributors.clone(),
            events: self.contribution_events.clone(),
            votes: self.team_votes.clone(),
            descriptions: Vec::new(),
        }
    }
}

/// Request to compute an attribution from free-text descriptions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualitativeRequest {
    /// Asset the attribution is for, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,

    /// Contributors taking part
    #[serde(default)]
    pub contributors: Vec<Contributor>,

    /// One narrative per contributor
    #[serde(default)]
    pub descriptions: Vec<QualitativeDescription>,
}

impl QualitativeRequest {
    pub(crate) fn bundle(&self) -> EvidenceBundle {
        EvidenceBundle {
            contributors: self.contributors.clone(),
            descriptions: self.descriptions.clone(),
            ..EvidenceBundle::default()
        }
    }
}

/// Loosely-typed policy parameters as they arrive on the wire
///
/// Resolved into [`eqip_domain::PolicyParams`] by
/// [`crate::policy::resolve_policy`]. Every field is optional; missing
/// values take configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyParamsInput {
    /// Shares to distribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shares: Option<u64>,

    /// Funding amount per contributor email (funding_based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<BTreeMap<String, f64>>,

    /// Labor portion of ownership (funding_based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweat_equity_weight: Option<f64>,

    /// Months until fully vested (time_vested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vesting_period_months: Option<f64>,

    /// Months before anything vests (time_vested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliff_months: Option<f64>,

    /// Months contributed per contributor email (time_vested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_data: Option<BTreeMap<String, f64>>,
}

/// Request to turn attributions into an ownership arrangement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipRequest {
    /// Asset the arrangement is for, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,

    /// Attributions to allocate over
    #[serde(default)]
    pub attribution_weights: Vec<ContributorAttribution>,

    /// `equal`, `weighted`, `funding_based` or `time_vested`
    #[serde(default = "default_policy_type")]
    pub policy_type: String,

    /// Policy parameters
    #[serde(default)]
    pub policy_params: PolicyParamsInput,
}

impl Default for OwnershipRequest {
    fn default() -> Self {
        Self {
            asset_id: None,
            attribution_weights: Vec::new(),
            policy_type: default_policy_type(),
            policy_params: PolicyParamsInput::default(),
        }
    }
}

/// Request to run the whole chain in one call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRunRequest {
    /// Asset the run is for, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,

    /// Contributors taking part
    #[serde(default)]
    pub contributors: Vec<Contributor>,

    /// Contribution events
    #[serde(default, alias = "events")]
    pub contribution_events: Vec<ContributionEvent>,

    /// Team votes
    #[serde(default, alias = "votes")]
    pub team_votes: Vec<TeamVote>,

    /// Free-text descriptions; used instead of events and votes when the
    /// run is qualitative
    #[serde(default)]
    pub descriptions: Vec<QualitativeDescription>,

    /// Score from descriptions rather than events and votes
    #[serde(default)]
    pub qualitative: bool,

    /// Evidence source to score from
    #[serde(default)]
    pub mode: AttributionMode,

    /// Per-type weights; the configured table is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ContributionWeights>,

    /// Allocation policy
    #[serde(default = "default_policy_type")]
    pub policy_type: String,

    /// Policy parameters
    #[serde(default)]
    pub policy_params: PolicyParamsInput,
}

impl Default for PipelineRunRequest {
    fn default() -> Self {
        Self {
            asset_id: None,
            contributors: Vec::new(),
            contribution_events: Vec::new(),
            team_votes: Vec::new(),
            descriptions: Vec::new(),
            qualitative: false,
            mode: AttributionMode::default(),
            weights: None,
            policy_type: default_policy_type(),
            policy_params: PolicyParamsInput::default(),
        }
    }
}

impl PipelineRunRequest {
    pub(crate) fn attribution_request(&self) -> AttributionRequest {
        AttributionRequest {
            asset_id: self.asset_id,
            contributors: self.contributors.clone(),
            contribution_events: self.contribution_events.clone(),
            team_votes: self.team_votes.clone(),
            mode: self.mode,
            weights: self.weights,
        }
    }

    pub(crate) fn qualitative_request(&self) -> QualitativeRequest {
        QualitativeRequest {
            asset_id: self.asset_id,
            contributors: self.contributors.clone(),
            descriptions: self.descriptions.clone(),
        }
    }

    pub(crate) fn ownership_request(&self, attribution: &Attribution) -> OwnershipRequest {
        OwnershipRequest {
            asset_id: self.asset_id,
            attribution_weights: attribution.attributions.clone(),
            policy_type: self.policy_type.clone(),
            policy_params: self.policy_params.clone(),
        }
    }
}

/// Result of a full pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Identifier of this run, also recorded on the tracing span
    pub run_id: Uuid,

    /// Attribution stage output
    pub attribution: Attribution,

    /// Allocation stage output
    pub arrangement: OwnershipArrangement,

    /// Every warning raised by either stage
    #[serde(default)]
    pub warnings: Vec<String>,
}
