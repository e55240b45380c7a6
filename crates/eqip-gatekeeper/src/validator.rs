//! Evidence validation logic

use crate::{GatekeeperError, ValidationConfig};
use eqip_domain::{
    ContributionEvent, Contributor, NormalizedEvidence, QualitativeDescription, TeamVote,
};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Raw evidence as received, before any checks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceBundle {
    /// Contributors, in input order
    pub contributors: Vec<Contributor>,

    /// Contribution events
    pub events: Vec<ContributionEvent>,

    /// Team votes
    pub votes: Vec<TeamVote>,

    /// Qualitative descriptions
    pub descriptions: Vec<QualitativeDescription>,
}

impl EvidenceBundle {
    fn has_evidence(&self) -> bool {
        !self.events.is_empty() || !self.votes.is_empty() || !self.descriptions.is_empty()
    }
}

/// Kind of evidence record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceKind {
    /// A contribution event
    Event,
    /// A team vote
    Vote,
    /// A qualitative description
    Description,
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EvidenceKind::Event => "event",
            EvidenceKind::Vote => "vote",
            EvidenceKind::Description => "description",
        })
    }
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Evidence was supplied but the contributor list is empty
    NoContributors,

    /// A contributor has an empty email
    EmptyEmail {
        /// Position in the contributor list
        index: usize,
    },

    /// The same email appears twice in the contributor list
    DuplicateContributor(String),

    /// An event has an out-of-range value
    InvalidEvent {
        /// Position in the event list
        index: usize,
        /// Description of the issue
        issue: String,
    },

    /// A vote has an out-of-range weight
    InvalidVote {
        /// Position in the vote list
        index: usize,
        /// Description of the issue
        issue: String,
    },

    /// A record references an email missing from the contributor list
    UnknownContributor {
        /// Kind of record
        kind: EvidenceKind,
        /// The unknown email
        email: String,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NoContributors => {
                write!(f, "evidence supplied without any contributors")
            }
            RejectionReason::EmptyEmail { index } => {
                write!(f, "contributor #{} has an empty email", index)
            }
            RejectionReason::DuplicateContributor(email) => {
                write!(f, "contributor '{}' is listed more than once", email)
            }
            RejectionReason::InvalidEvent { index, issue } => write!(f, "event #{}: {}", index, issue),
            RejectionReason::InvalidVote { index, issue } => write!(f, "vote #{}: {}", index, issue),
            RejectionReason::UnknownContributor { kind, email } => {
                write!(f, "{} references unknown contributor '{}'", kind, email)
            }
        }
    }
}

/// Validated evidence plus the repairs made along the way
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationOutcome {
    /// Evidence safe to hand to a scorer
    pub evidence: NormalizedEvidence,

    /// Human-readable notes about dropped or collapsed records
    pub notices: Vec<String>,
}

/// The Gatekeeper validates evidence before scoring
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Validate a bundle and produce normalized evidence
    ///
    /// Every malformed record is collected before failing, so the error
    /// lists all problems at once. Unknown-contributor records are dropped
    /// with a notice unless `reject_unknown_contributors` is set.
    pub fn normalize(&self, bundle: EvidenceBundle) -> Result<NormalizationOutcome, GatekeeperError> {
        self.config.validate().map_err(GatekeeperError::Config)?;

        if bundle.contributors.is_empty() {
            if bundle.has_evidence() {
                return Err(GatekeeperError::Rejected(vec![RejectionReason::NoContributors]));
            }
            return Ok(NormalizationOutcome {
                evidence: NormalizedEvidence::default(),
                notices: Vec::new(),
            });
        }

        let mut reasons = Vec::new();
        let mut notices = Vec::new();

        // 1. Contributor list
        let contributors = self.check_contributors(bundle.contributors, &mut reasons, &mut notices);
        let known: HashSet<&str> = contributors.iter().map(|c| c.email.as_str()).collect();

        // 2. Events
        for (index, event) in bundle.events.iter().enumerate() {
            if let Some(issue) = event_issue(event) {
                reasons.push(RejectionReason::InvalidEvent { index, issue });
            }
        }

        // 3. Votes
        for (index, vote) in bundle.votes.iter().enumerate() {
            if !vote.weight.is_finite() || vote.weight < 0.0 || vote.weight > self.config.max_vote_weight {
                reasons.push(RejectionReason::InvalidVote {
                    index,
                    issue: format!(
                        "weight {} is outside [0, {}]",
                        vote.weight, self.config.max_vote_weight
                    ),
                });
            }
        }

        // 4. Referential integrity
        let events = self.retain_known(bundle.events, EvidenceKind::Event, &known, &mut reasons, &mut notices);
        let votes = self.retain_known(bundle.votes, EvidenceKind::Vote, &known, &mut reasons, &mut notices);
        let descriptions = self.retain_known(
            bundle.descriptions,
            EvidenceKind::Description,
            &known,
            &mut reasons,
            &mut notices,
        );

        if !reasons.is_empty() {
            return Err(GatekeeperError::Rejected(reasons));
        }

        let descriptions = collapse_descriptions(descriptions, &mut notices);

        Ok(NormalizationOutcome {
            evidence: NormalizedEvidence::with_contributors(contributors)
                .with_events(events)
                .with_votes(votes)
                .with_descriptions(descriptions),
            notices,
        })
    }

    fn check_contributors(
        &self,
        contributors: Vec<Contributor>,
        reasons: &mut Vec<RejectionReason>,
        notices: &mut Vec<String>,
    ) -> Vec<Contributor> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(contributors.len());

        for (index, contributor) in contributors.into_iter().enumerate() {
            if contributor.email.trim().is_empty() {
                reasons.push(RejectionReason::EmptyEmail { index });
                continue;
            }
            if !seen.insert(contributor.email.clone()) {
                if self.config.reject_duplicate_contributors {
                    reasons.push(RejectionReason::DuplicateContributor(contributor.email));
                } else {
                    notices.push(format!(
                        "Dropped repeated contributor entry for '{}'",
                        contributor.email
                    ));
                }
                continue;
            }
            kept.push(contributor);
        }
        kept
    }

    fn retain_known<T: Attributed>(
        &self,
        records: Vec<T>,
        kind: EvidenceKind,
        known: &HashSet<&str>,
        reasons: &mut Vec<RejectionReason>,
        notices: &mut Vec<String>,
    ) -> Vec<T> {
        let mut kept = Vec::with_capacity(records.len());
        let mut dropped = 0usize;
        let mut unknown: Vec<String> = Vec::new();

        for record in records {
            let email = record.contributor_email();
            if known.contains(email) {
                kept.push(record);
                continue;
            }
            if self.config.reject_unknown_contributors {
                reasons.push(RejectionReason::UnknownContributor {
                    kind,
                    email: email.to_string(),
                });
            } else {
                dropped += 1;
                if !unknown.iter().any(|u| u == email) {
                    unknown.push(email.to_string());
                }
            }
        }

        if dropped > 0 {
            notices.push(format!(
                "Dropped {} {} record(s) for unknown contributors: {}",
                dropped,
                kind,
                unknown.join(", ")
            ));
        }
        kept
    }
}

/// A record that belongs to one contributor
trait Attributed {
    fn contributor_email(&self) -> &str;
}

impl Attributed for ContributionEvent {
    fn contributor_email(&self) -> &str {
        &self.contributor_email
    }
}

impl Attributed for TeamVote {
    fn contributor_email(&self) -> &str {
        &self.contributor_email
    }
}

impl Attributed for QualitativeDescription {
    fn contributor_email(&self) -> &str {
        &self.contributor_email
    }
}

fn event_issue(event: &ContributionEvent) -> Option<String> {
    if let Some(hours) = event.hours_spent {
        if !hours.is_finite() || hours < 0.0 {
            return Some(format!("hours_spent must be a non-negative number, got {}", hours));
        }
    }
    if !event.complexity_score.is_finite() || event.complexity_score <= 0.0 {
        return Some(format!(
            "complexity_score must be positive, got {}",
            event.complexity_score
        ));
    }
    None
}

/// Keep the last description per contributor, in first-seen order
fn collapse_descriptions(
    descriptions: Vec<QualitativeDescription>,
    notices: &mut Vec<String>,
) -> Vec<QualitativeDescription> {
    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, QualitativeDescription> = HashMap::new();

    for description in descriptions {
        let email = description.contributor_email.clone();
        if latest.insert(email.clone(), description).is_some() {
            notices.push(format!(
                "Multiple descriptions for '{}'; keeping the last one",
                email
            ));
        } else {
            order.push(email);
        }
    }

    order
        .into_iter()
        .filter_map(|email| latest.remove(&email))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eqip_domain::ContributionType;

    fn create_test_bundle() -> EvidenceBundle {
        EvidenceBundle {
            contributors: vec![
                Contributor::new("alice@x.io", "Alice"),
                Contributor::new("bob@x.io", "Bob"),
            ],
            events: vec![
                ContributionEvent::new("alice@x.io", ContributionType::Code)
                    .with_lines(100)
                    .with_hours(5.0),
                ContributionEvent::new("bob@x.io", ContributionType::Review).with_hours(2.0),
            ],
            votes: vec![TeamVote::new("alice@x.io", "bob@x.io", 0.7)],
            descriptions: vec![QualitativeDescription::new("alice@x.io", "Led the design")],
        }
    }

    #[test]
    fn test_valid_bundle() {
        let gatekeeper = Gatekeeper::default_config();
        let outcome = gatekeeper.normalize(create_test_bundle()).unwrap();

        assert_eq!(outcome.evidence.contributor_count(), 2);
        assert_eq!(outcome.evidence.events.len(), 2);
        assert_eq!(outcome.evidence.votes.len(), 1);
        assert!(outcome.notices.is_empty());
    }

    #[test]
    fn test_empty_bundle_is_fine() {
        let outcome = Gatekeeper::default_config()
            .normalize(EvidenceBundle::default())
            .unwrap();
        assert_eq!(outcome.evidence, NormalizedEvidence::default());
    }

    #[test]
    fn test_evidence_without_contributors() {
        let mut bundle = create_test_bundle();
        bundle.contributors.clear();

        let err = Gatekeeper::default_config().normalize(bundle).unwrap_err();
        assert_eq!(err.reasons(), &[RejectionReason::NoContributors]);
    }

    #[test]
    fn test_unknown_contributor_dropped() {
        let mut bundle = create_test_bundle();
        bundle
            .events
            .push(ContributionEvent::new("ghost@x.io", ContributionType::Code).with_lines(10));

        let outcome = Gatekeeper::default_config().normalize(bundle).unwrap();
        assert_eq!(outcome.evidence.events.len(), 2);
        assert_eq!(outcome.notices.len(), 1);
        assert!(outcome.notices[0].contains("ghost@x.io"));
    }

    #[test]
    fn test_unknown_contributor_rejected_when_strict() {
        let mut bundle = create_test_bundle();
        bundle.votes.push(TeamVote::new("alice@x.io", "ghost@x.io", 0.5));

        let err = Gatekeeper::new(ValidationConfig::strict())
            .normalize(bundle)
            .unwrap_err();
        match &err.reasons()[0] {
            RejectionReason::UnknownContributor { kind, email } => {
                assert_eq!(*kind, EvidenceKind::Vote);
                assert_eq!(email, "ghost@x.io");
            }
            other => panic!("Expected UnknownContributor, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_contributor() {
        let mut bundle = create_test_bundle();
        bundle.contributors.push(Contributor::new("alice@x.io", "Alice Again"));

        let err = Gatekeeper::default_config().normalize(bundle.clone()).unwrap_err();
        assert_eq!(
            err.reasons(),
            &[RejectionReason::DuplicateContributor("alice@x.io".to_string())]
        );

        let outcome = Gatekeeper::new(ValidationConfig::permissive())
            .normalize(bundle)
            .unwrap();
        assert_eq!(outcome.evidence.contributor_count(), 2);
        assert_eq!(outcome.evidence.contributors[0].display_name, "Alice");
    }

    #[test]
    fn test_empty_email() {
        let mut bundle = create_test_bundle();
        bundle.contributors.push(Contributor::new("  ", "Nobody"));

        let err = Gatekeeper::default_config().normalize(bundle).unwrap_err();
        assert_eq!(err.reasons(), &[RejectionReason::EmptyEmail { index: 2 }]);
    }

    #[test]
    fn test_multiple_validation_errors() {
        let mut bundle = create_test_bundle();
        bundle.events[0].hours_spent = Some(-1.0);
        bundle.events[1].complexity_score = 0.0;
        bundle.votes[0].weight = 1.5;

        let err = Gatekeeper::default_config().normalize(bundle).unwrap_err();
        assert_eq!(err.reasons().len(), 3);
        assert!(err.to_string().starts_with("Validation error: event #0"));
    }

    #[test]
    fn test_last_description_wins() {
        let mut bundle = create_test_bundle();
        bundle
            .descriptions
            .push(QualitativeDescription::new("bob@x.io", "Reviewed everything"));
        bundle
            .descriptions
            .push(QualitativeDescription::new("alice@x.io", "Led the architecture"));

        let outcome = Gatekeeper::default_config().normalize(bundle).unwrap();
        assert_eq!(outcome.evidence.descriptions.len(), 2);
        assert_eq!(
            outcome.evidence.description_for("alice@x.io"),
            Some("Led the architecture")
        );
        assert_eq!(outcome.notices.len(), 1);
    }
}
