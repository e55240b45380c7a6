//! Core Pipeline implementation

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::policy::resolve_policy;
use crate::types::{
    AttributionRequest, OwnershipRequest, PipelineOutcome, PipelineRunRequest, QualitativeRequest,
};
use eqip_domain::{
    compute_attribution, finalize_ownership, Attribution, AttributionScorer, DomainError,
    EvidenceScorer, OwnershipArrangement, QualitativeScorer,
};
use eqip_gatekeeper::{EvidenceBundle, Gatekeeper};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// The Pipeline runs normalize → score → allocate → reconcile → summarize
///
/// Holds configuration only; every call is independent, so one instance
/// can serve concurrent requests.
pub struct Pipeline {
    config: PipelineConfig,
    gatekeeper: Gatekeeper,
    qualitative: QualitativeScorer,
}

impl Pipeline {
    /// Create a new Pipeline, validating the configuration
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self {
            gatekeeper: Gatekeeper::new(config.validation.clone()),
            qualitative: QualitativeScorer::new(config.scoring.vocabulary.clone()),
            config,
        })
    }

    /// Create a Pipeline with default configuration
    pub fn with_defaults() -> Self {
        let config = PipelineConfig::default();
        Self {
            gatekeeper: Gatekeeper::new(config.validation.clone()),
            qualitative: QualitativeScorer::new(config.scoring.vocabulary.clone()),
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Score contributors from events and votes
    pub fn compute_attribution(&self, request: &AttributionRequest) -> Result<Attribution, PipelineError> {
        let weights = request.weights.unwrap_or(self.config.scoring.weights);
        weights
            .validate()
            .map_err(|e| PipelineError::Domain(DomainError::Validation(e)))?;

        info!(
            "Computing attribution for {} contributors ({} events, {} votes, mode {})",
            request.contributors.len(),
            request.contribution_events.len(),
            request.team_votes.len(),
            request.mode
        );

        let scorer = EvidenceScorer::new(request.mode, weights);
        self.attribute(request.asset_id, request.bundle(), &scorer)
    }

    /// Score contributors from free-text descriptions
    pub fn compute_qualitative_attribution(
        &self,
        request: &QualitativeRequest,
    ) -> Result<Attribution, PipelineError> {
        info!(
            "Computing qualitative attribution for {} contributors ({} descriptions)",
            request.contributors.len(),
            request.descriptions.len()
        );
        self.attribute(request.asset_id, request.bundle(), &self.qualitative)
    }

    /// Turn attributions into a reconciled ownership arrangement
    pub fn finalize_ownership(
        &self,
        request: &OwnershipRequest,
    ) -> Result<OwnershipArrangement, PipelineError> {
        let resolved = resolve_policy(
            &request.policy_type,
            &request.policy_params,
            &self.config.allocation,
        )?;

        let mut arrangement =
            finalize_ownership(request.asset_id, &request.attribution_weights, &resolved.params)?;

        let mut warnings = resolved.warnings;
        warnings.append(&mut arrangement.warnings);
        for warning in &warnings {
            warn!("{}", warning);
        }
        arrangement.warnings = warnings;

        info!(
            "Finalized ownership: {} holders, {} shares, policy {}",
            arrangement.ownership_table.len(),
            arrangement.total_shares,
            arrangement.policy_applied
        );
        Ok(arrangement)
    }

    /// Run the whole chain in one call
    pub fn run(&self, request: &PipelineRunRequest) -> Result<PipelineOutcome, PipelineError> {
        let run_id = Uuid::now_v7();
        let span = info_span!("pipeline_run", %run_id, asset_id = ?request.asset_id);
        let _guard = span.enter();

        let attribution = if request.qualitative {
            self.compute_qualitative_attribution(&request.qualitative_request())?
        } else {
            self.compute_attribution(&request.attribution_request())?
        };
        let arrangement = self.finalize_ownership(&request.ownership_request(&attribution))?;

        let warnings: Vec<String> = attribution
            .warnings
            .iter()
            .chain(arrangement.warnings.iter())
            .cloned()
            .collect();

        info!("Pipeline run complete with {} warnings", warnings.len());
        Ok(PipelineOutcome {
            run_id,
            attribution,
            arrangement,
            warnings,
        })
    }

    fn attribute(
        &self,
        asset_id: Option<i64>,
        bundle: EvidenceBundle,
        scorer: &dyn AttributionScorer,
    ) -> Result<Attribution, PipelineError> {
        let outcome = self.gatekeeper.normalize(bundle)?;
        for notice in &outcome.notices {
            warn!("{}", notice);
        }

        let mut attribution = compute_attribution(&outcome.evidence, scorer);
        attribution.asset_id = asset_id;
        attribution.warnings = outcome.notices;

        debug!(
            "Attribution methodology '{}', confidence {:.2}",
            attribution.methodology, attribution.confidence_score
        );
        Ok(attribution)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eqip_domain::{ContributionEvent, ContributionType, Contributor, PolicyType, TeamVote};

    fn contributors() -> Vec<Contributor> {
        vec![
            Contributor::new("alice@x.io", "Alice"),
            Contributor::new("bob@x.io", "Bob"),
        ]
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.allocation.default_total_shares = 0;
        assert!(matches!(Pipeline::new(config), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_asset_id_passes_through() {
        let request = AttributionRequest {
            asset_id: Some(42),
            contributors: contributors(),
            ..AttributionRequest::default()
        };
        let attribution = Pipeline::with_defaults().compute_attribution(&request).unwrap();
        assert_eq!(attribution.asset_id, Some(42));
        assert_eq!(attribution.confidence_score, 0.3);
    }

    #[test]
    fn test_unknown_evidence_becomes_warning() {
        let request = AttributionRequest {
            contributors: contributors(),
            contribution_events: vec![
                ContributionEvent::new("alice@x.io", ContributionType::Code).with_lines(100),
                ContributionEvent::new("ghost@x.io", ContributionType::Code).with_lines(100),
            ],
            team_votes: vec![TeamVote::new("alice@x.io", "bob@x.io", 0.5)],
            ..AttributionRequest::default()
        };
        let attribution = Pipeline::with_defaults().compute_attribution(&request).unwrap();
        assert_eq!(attribution.warnings.len(), 1);
        assert!(attribution.warnings[0].contains("ghost@x.io"));
    }

    #[test]
    fn test_negative_request_weights_rejected() {
        let request = AttributionRequest {
            contributors: contributors(),
            weights: Some(eqip_domain::ContributionWeights {
                code: -1.0,
                ..Default::default()
            }),
            ..AttributionRequest::default()
        };
        let err = Pipeline::with_defaults().compute_attribution(&request).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_run_collects_warnings() {
        let request = PipelineRunRequest {
            contributors: contributors(),
            policy_type: "mystery".to_string(),
            ..PipelineRunRequest::default()
        };
        let outcome = Pipeline::with_defaults().run(&request).unwrap();

        assert_eq!(outcome.arrangement.policy_applied, PolicyType::Weighted);
        assert_eq!(outcome.arrangement.allocated_shares(), 1_000_000);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.run_id.get_version_num(), 7);
    }
}
