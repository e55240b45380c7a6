//! Seams between the pipeline stages
//!
//! Scoring strategies and allocation policies are interchangeable behind
//! these traits: the policy engine never needs to know which scorer produced
//! its attributions.

use crate::attribution::ContributorAttribution;
use crate::attribution_computation::ScoreSheet;
use crate::evidence::NormalizedEvidence;
use crate::ownership::{OwnershipShare, PolicyType};

/// A strategy that turns evidence into raw per-contributor scores
///
/// Implemented by [`crate::EvidenceScorer`] (events and votes) and
/// [`crate::QualitativeScorer`] (free-text heuristics). The raw sheet is
/// normalized by [`crate::attribution_computation::normalize`].
pub trait AttributionScorer {
    /// Score every contributor in the evidence
    fn score(&self, evidence: &NormalizedEvidence) -> ScoreSheet;
}

/// Output of a single allocation policy, before reconciliation
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    /// Computed shares (floor-rounded)
    pub shares: Vec<OwnershipShare>,

    /// Policy that actually ran (differs from the requested one on degradation)
    pub applied: PolicyType,

    /// Degradations applied by the policy
    pub notices: Vec<String>,
}

/// A pure mapping from attributions to an ownership table
pub trait AllocationPolicy {
    /// The policy this implementation represents
    fn policy_type(&self) -> PolicyType;

    /// Allocate `total_shares` across the attributions
    fn allocate(&self, attributions: &[ContributorAttribution], total_shares: u64) -> PolicyOutcome;
}
