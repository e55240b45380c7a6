//! Validated evidence handed from the normalizer to the scorers

use crate::contributor::{Contributor, ContributionEvent, QualitativeDescription, TeamVote};

/// Evidence that passed referential-integrity checks
///
/// Every event, vote and description references a contributor in
/// `contributors`, and there is at most one description per contributor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedEvidence {
    /// Contributors, in input order
    pub contributors: Vec<Contributor>,

    /// Contribution events
    pub events: Vec<ContributionEvent>,

    /// Team votes
    pub votes: Vec<TeamVote>,

    /// Qualitative descriptions, one per contributor at most
    pub descriptions: Vec<QualitativeDescription>,
}

impl NormalizedEvidence {
    /// Evidence with contributors only
    pub fn with_contributors(contributors: Vec<Contributor>) -> Self {
        Self {
            contributors,
            ..Self::default()
        }
    }

    /// Add events
    pub fn with_events(mut self, events: Vec<ContributionEvent>) -> Self {
        self.events = events;
        self
    }

    /// Add votes
    pub fn with_votes(mut self, votes: Vec<TeamVote>) -> Self {
        self.votes = votes;
        self
    }

    /// Add descriptions
    pub fn with_descriptions(mut self, descriptions: Vec<QualitativeDescription>) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Number of contributors
    pub fn contributor_count(&self) -> usize {
        self.contributors.len()
    }

    /// Whether any contribution events are present
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Whether any team votes are present
    pub fn has_votes(&self) -> bool {
        !self.votes.is_empty()
    }

    /// Description text for a contributor, if one was supplied
    pub fn description_for(&self, email: &str) -> Option<&str> {
        self.descriptions
            .iter()
            .find(|d| d.contributor_email == email)
            .map(|d| d.text.as_str())
    }
}
