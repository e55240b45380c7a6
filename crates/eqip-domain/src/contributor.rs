//! Contributor and evidence records
//!
//! These are the raw inputs of an attribution run. They are created once per
//! run and never mutated; events are append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A team member taking part in an attribution run
///
/// The email is the contributor's identity and must be unique within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Unique identity
    pub email: String,

    /// Human-readable name
    pub display_name: String,

    /// Optional organization
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "organization")]
    pub org: Option<String>,
}

impl Contributor {
    /// Create a contributor without an organization
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            org: None,
        }
    }
}

/// Kind of work recorded by a contribution event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionType {
    /// Source code
    Code,
    /// Product or technical design
    Design,
    /// Code or design review
    Review,
    /// Written documentation
    Documentation,
    /// Test authoring and QA
    Testing,
}

impl ContributionType {
    /// All contribution types, in breakdown order
    pub const ALL: [ContributionType; 5] = [
        ContributionType::Code,
        ContributionType::Design,
        ContributionType::Review,
        ContributionType::Documentation,
        ContributionType::Testing,
    ];

    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionType::Code => "code",
            ContributionType::Design => "design",
            ContributionType::Review => "review",
            ContributionType::Documentation => "documentation",
            ContributionType::Testing => "testing",
        }
    }
}

impl fmt::Display for ContributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_complexity() -> f64 {
    1.0
}

/// A single recorded piece of work by one contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionEvent {
    /// Email of the contributor who did the work
    pub contributor_email: String,

    /// Kind of work
    pub event_type: ContributionType,

    /// Lines of code added or modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_of_code: Option<u64>,

    /// Time spent in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_spent: Option<f64>,

    /// Complexity multiplier (1.0 = normal, 3.0 = very high)
    #[serde(default = "default_complexity", alias = "complexity")]
    pub complexity_score: f64,

    /// Brief description of the work
    #[serde(default)]
    pub description: String,

    /// When the work happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ContributionEvent {
    /// Create an event with normal complexity and no numeric fields
    pub fn new(contributor_email: impl Into<String>, event_type: ContributionType) -> Self {
        Self {
            contributor_email: contributor_email.into(),
            event_type,
            lines_of_code: None,
            hours_spent: None,
            complexity_score: default_complexity(),
            description: String::new(),
            timestamp: None,
        }
    }

    /// Set lines of code
    pub fn with_lines(mut self, lines: u64) -> Self {
        self.lines_of_code = Some(lines);
        self
    }

    /// Set hours spent
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours_spent = Some(hours);
        self
    }

    /// Set the complexity multiplier
    pub fn with_complexity(mut self, complexity: f64) -> Self {
        self.complexity_score = complexity;
        self
    }
}

/// One voter's weight assignment for a contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamVote {
    /// Who cast the vote
    pub voter_email: String,

    /// Who the vote is for
    pub contributor_email: String,

    /// Vote weight in [0, 1]
    pub weight: f64,

    /// Reason for the vote
    #[serde(default)]
    pub rationale: String,
}

impl TeamVote {
    /// Create a vote without a rationale
    pub fn new(
        voter_email: impl Into<String>,
        contributor_email: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            voter_email: voter_email.into(),
            contributor_email: contributor_email.into(),
            weight,
            rationale: String::new(),
        }
    }
}

/// Free-text narrative of one contributor's work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitativeDescription {
    /// Contributor the narrative describes
    pub contributor_email: String,

    /// The narrative
    #[serde(alias = "description")]
    pub text: String,
}

impl QualitativeDescription {
    /// Create a description
    pub fn new(contributor_email: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            contributor_email: contributor_email.into(),
            text: text.into(),
        }
    }
}
