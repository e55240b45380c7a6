//! Eqip Domain Layer
//!
//! Pure data model and decision logic for turning contribution evidence into
//! an ownership arrangement. No I/O and no logging: every function here is a
//! deterministic mapping from inputs to outputs, and degradations are
//! reported as values (`warnings`, notices) for the caller to log.
//!
//! ## Key Concepts
//!
//! - **Attribution**: per-contributor weights in [0, 1] summing to 1.0
//! - **Scorer**: a strategy producing raw scores from evidence
//!   ([`EvidenceScorer`] or [`QualitativeScorer`])
//! - **Policy**: a pure mapping from attributions to integer shares
//! - **Reconciliation**: forcing the shares to sum to the total exactly
//! - **Governance**: control tiers and a summary derived from percentages
//!
//! ## Flow
//!
//! ```text
//! NormalizedEvidence -> AttributionScorer -> normalize -> Attribution
//! Attribution -> AllocationPolicy -> reconcile -> summarize -> OwnershipArrangement
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allocation;
pub mod attribution;
pub mod attribution_computation;
pub mod contributor;
pub mod error;
pub mod evidence;
pub mod finalization;
pub mod governance;
pub mod ownership;
pub mod qualitative;
pub mod reconciliation;
pub mod traits;

// Re-exports for convenience
pub use attribution::{Attribution, AttributionMode, ContributionWeights, ContributorAttribution};
pub use attribution_computation::{compute_attribution, EvidenceScorer, ScoreSheet};
pub use contributor::{
    ContributionEvent, ContributionType, Contributor, QualitativeDescription, TeamVote,
};
pub use error::DomainError;
pub use evidence::NormalizedEvidence;
pub use finalization::finalize_ownership;
pub use ownership::{
    EqualParams, FundingParams, GovernanceRights, OwnershipArrangement, OwnershipShare,
    PolicyParams, PolicyType, TimeVestedParams, WeightedParams,
};
pub use qualitative::{KeywordVocabulary, QualitativeScorer};
pub use traits::{AllocationPolicy, AttributionScorer, PolicyOutcome};
