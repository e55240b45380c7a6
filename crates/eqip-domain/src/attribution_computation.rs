//! Attribution computation
//!
//! Turns validated evidence into normalized attribution weights in two steps:
//! 1. Raw scoring by an [`AttributionScorer`] strategy (events, votes, hybrid,
//!    or the qualitative heuristics in [`crate::qualitative`])
//! 2. Normalization, applied exactly once, so that weights sum to 1.0
//!
//! Both steps are deterministic and side-effect free.

use crate::attribution::{Attribution, AttributionMode, ContributionWeights, ContributorAttribution};
use crate::contributor::{ContributionEvent, ContributionType};
use crate::evidence::NormalizedEvidence;
use crate::traits::AttributionScorer;
use std::collections::{BTreeMap, HashMap};

/// Share of the hybrid score taken from events when votes are also present
pub const HYBRID_EVENT_SHARE: f64 = 0.6;

/// Share of the hybrid score taken from votes when events are also present
pub const HYBRID_VOTE_SHARE: f64 = 0.4;

/// Confidence when every contributor has at least one event on average
pub const EVENTS_FULL_CONFIDENCE: f64 = 0.8;
/// Confidence when there are fewer events than contributors
pub const EVENTS_PARTIAL_CONFIDENCE: f64 = 0.6;
/// Confidence when there are at least as many votes as contributors
pub const VOTES_FULL_CONFIDENCE: f64 = 0.7;
/// Confidence when there are fewer votes than contributors
pub const VOTES_PARTIAL_CONFIDENCE: f64 = 0.5;
/// Confidence for hybrid scoring with both evidence kinds
pub const HYBRID_FULL_CONFIDENCE: f64 = 0.85;
/// Confidence for hybrid scoring with one evidence kind
pub const HYBRID_PARTIAL_CONFIDENCE: f64 = 0.7;
/// Confidence of the equal-distribution fallback
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Methodology reported when there is nobody to attribute to
pub const NO_CONTRIBUTORS_METHODOLOGY: &str = "No contributors provided";
/// Methodology reported by the equal-distribution fallback
pub const FALLBACK_METHODOLOGY: &str = "Equal distribution (no contribution data available)";

/// Raw (un-normalized) score for one contributor
#[derive(Debug, Clone, PartialEq)]
pub struct RawScore {
    /// Contributor identity
    pub email: String,

    /// Contributor display name
    pub name: String,

    /// Raw score, >= 0
    pub score: f64,

    /// Weighted sub-score per contribution type
    pub breakdown: BTreeMap<ContributionType, f64>,

    /// Strategy-specific explanation; when absent the rationale is built
    /// from the breakdown
    pub detail: Option<String>,
}

impl RawScore {
    fn new(email: &str, name: &str, score: f64) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            score,
            breakdown: BTreeMap::new(),
            detail: None,
        }
    }
}

/// Everything a scoring strategy hands to normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSheet {
    /// One entry per contributor, in input order
    pub scores: Vec<RawScore>,

    /// Which branch produced the scores
    pub methodology: String,

    /// Confidence signal for this branch
    pub confidence: f64,
}

impl ScoreSheet {
    /// Sheet for an empty contributor set
    pub fn empty() -> Self {
        Self {
            scores: Vec::new(),
            methodology: NO_CONTRIBUTORS_METHODOLOGY.to_string(),
            confidence: 0.0,
        }
    }

    /// Equal raw scores for every contributor
    pub fn equal_distribution(evidence: &NormalizedEvidence) -> Self {
        let n = evidence.contributor_count();
        if n == 0 {
            return Self::empty();
        }

        let equal = 1.0 / n as f64;
        Self {
            scores: evidence
                .contributors
                .iter()
                .map(|c| RawScore::new(&c.email, &c.display_name, equal))
                .collect(),
            methodology: FALLBACK_METHODOLOGY.to_string(),
            confidence: FALLBACK_CONFIDENCE,
        }
    }
}

/// Score evidence with a strategy and normalize the result
pub fn compute_attribution(
    evidence: &NormalizedEvidence,
    scorer: &dyn AttributionScorer,
) -> Attribution {
    normalize(scorer.score(evidence))
}

/// Normalize raw scores into weights summing to 1.0
///
/// `weight_i = s_i / sum(s)` when the sum is positive, otherwise `1/N`.
/// Attributions are ordered by descending weight; ties keep input order.
pub fn normalize(sheet: ScoreSheet) -> Attribution {
    let ScoreSheet {
        scores,
        methodology,
        confidence,
    } = sheet;

    let total: f64 = scores.iter().map(|s| s.score).sum();
    let n = scores.len();

    let mut attributions: Vec<ContributorAttribution> = scores
        .into_iter()
        .map(|raw| {
            let weight = if total > 0.0 {
                raw.score / total
            } else {
                1.0 / n as f64
            };
            let rationale = build_rationale(&raw, weight, &methodology);
            ContributorAttribution {
                contributor_email: raw.email,
                contributor_name: raw.name,
                weight,
                rationale,
                breakdown: raw
                    .breakdown
                    .into_iter()
                    .map(|(ty, score)| (ty.as_str().to_string(), score))
                    .collect(),
            }
        })
        .collect();

    attributions.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let total_weight = attributions.iter().map(|a| a.weight).sum();

    Attribution {
        asset_id: None,
        attributions,
        total_weight,
        methodology,
        confidence_score: confidence,
        warnings: Vec::new(),
    }
}

fn build_rationale(raw: &RawScore, weight: f64, methodology: &str) -> String {
    let pct = weight * 100.0;

    if let Some(detail) = &raw.detail {
        return format!("{}\n• Final weight: {:.1}%", detail, pct);
    }

    let parts: Vec<String> = raw
        .breakdown
        .iter()
        .filter(|(_, score)| **score > 0.0)
        .map(|(ty, score)| format!("{}: {:.2}", ty, score))
        .collect();

    if parts.is_empty() {
        format!("Attributed {:.1}% based on {}", pct, methodology.to_lowercase())
    } else {
        format!("Breakdown: {}. Final weight: {:.1}%", parts.join(", "), pct)
    }
}

/// Base score of a single event, before the per-type weight
///
/// Missing numeric fields count as zero, so an event without hours scores 0.
pub fn event_base_score(event: &ContributionEvent) -> f64 {
    let loc = event.lines_of_code.unwrap_or(0) as f64;
    let hours = event.hours_spent.unwrap_or(0.0);
    let complexity = event.complexity_score;

    match event.event_type {
        ContributionType::Code => (loc / 100.0).min(5.0) * (hours / 8.0).min(3.0) * complexity,
        ContributionType::Design => (hours / 4.0).min(4.0) * complexity,
        ContributionType::Review => (hours / 2.0).min(2.0) * complexity,
        ContributionType::Documentation | ContributionType::Testing => {
            (hours / 4.0).min(2.0) * complexity
        }
    }
}

/// Scores contributors from structured events and/or team votes
#[derive(Debug, Clone, Default)]
pub struct EvidenceScorer {
    mode: AttributionMode,
    weights: ContributionWeights,
}

/// Per-contributor event totals, aligned with the contributor list
#[derive(Debug, Clone)]
struct EventTotals {
    score: f64,
    breakdown: BTreeMap<ContributionType, f64>,
}

impl EvidenceScorer {
    /// Create a scorer for a mode and weight table
    pub fn new(mode: AttributionMode, weights: ContributionWeights) -> Self {
        Self { mode, weights }
    }

    fn event_totals(&self, evidence: &NormalizedEvidence) -> Vec<EventTotals> {
        let index = email_index(evidence);
        let mut totals: Vec<EventTotals> = evidence
            .contributors
            .iter()
            .map(|_| EventTotals {
                score: 0.0,
                breakdown: ContributionType::ALL.iter().map(|ty| (*ty, 0.0)).collect(),
            })
            .collect();

        for event in &evidence.events {
            let Some(&i) = index.get(event.contributor_email.as_str()) else {
                continue;
            };
            let weighted = event_base_score(event) * self.weights.weight_for(event.event_type);
            totals[i].score += weighted;
            *totals[i].breakdown.entry(event.event_type).or_insert(0.0) += weighted;
        }

        totals
    }

    fn vote_means(evidence: &NormalizedEvidence) -> Vec<f64> {
        let index = email_index(evidence);
        let mut sums = vec![(0.0_f64, 0_usize); evidence.contributor_count()];

        for vote in &evidence.votes {
            if let Some(&i) = index.get(vote.contributor_email.as_str()) {
                sums[i].0 += vote.weight;
                sums[i].1 += 1;
            }
        }

        sums.into_iter()
            .map(|(sum, count)| if count > 0 { sum / count as f64 } else { 0.0 })
            .collect()
    }

    fn events_sheet(&self, evidence: &NormalizedEvidence) -> ScoreSheet {
        let totals = self.event_totals(evidence);
        let scores = evidence
            .contributors
            .iter()
            .zip(totals)
            .map(|(c, t)| RawScore {
                breakdown: t.breakdown,
                ..RawScore::new(&c.email, &c.display_name, t.score)
            })
            .collect();

        ScoreSheet {
            scores,
            methodology: "Event-based attribution using contribution data".to_string(),
            confidence: if evidence.events.len() >= evidence.contributor_count() {
                EVENTS_FULL_CONFIDENCE
            } else {
                EVENTS_PARTIAL_CONFIDENCE
            },
        }
    }

    fn votes_sheet(evidence: &NormalizedEvidence) -> ScoreSheet {
        let means = Self::vote_means(evidence);
        let scores = evidence
            .contributors
            .iter()
            .zip(means)
            .map(|(c, mean)| RawScore::new(&c.email, &c.display_name, mean))
            .collect();

        ScoreSheet {
            scores,
            methodology: "Vote-based attribution using team consensus".to_string(),
            confidence: if evidence.votes.len() >= evidence.contributor_count() {
                VOTES_FULL_CONFIDENCE
            } else {
                VOTES_PARTIAL_CONFIDENCE
            },
        }
    }

    fn hybrid_sheet(&self, evidence: &NormalizedEvidence) -> ScoreSheet {
        let has_events = evidence.has_events();
        let has_votes = evidence.has_votes();

        let event_totals = has_events.then(|| self.event_totals(evidence));
        let vote_means = has_votes.then(|| Self::vote_means(evidence));

        let scores = evidence
            .contributors
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let mut raw = RawScore::new(&c.email, &c.display_name, 0.0);
                match (&event_totals, &vote_means) {
                    (Some(events), Some(votes)) => {
                        raw.score = HYBRID_EVENT_SHARE * events[i].score + HYBRID_VOTE_SHARE * votes[i];
                        raw.breakdown = events[i].breakdown.clone();
                    }
                    (Some(events), None) => {
                        raw.score = events[i].score;
                        raw.breakdown = events[i].breakdown.clone();
                    }
                    (None, Some(votes)) => raw.score = votes[i],
                    (None, None) => {}
                }
                raw
            })
            .collect();

        ScoreSheet {
            scores,
            methodology: "Hybrid attribution combining events and team votes".to_string(),
            confidence: if has_events && has_votes {
                HYBRID_FULL_CONFIDENCE
            } else {
                HYBRID_PARTIAL_CONFIDENCE
            },
        }
    }
}

impl AttributionScorer for EvidenceScorer {
    fn score(&self, evidence: &NormalizedEvidence) -> ScoreSheet {
        if evidence.contributors.is_empty() {
            return ScoreSheet::empty();
        }

        match self.mode {
            AttributionMode::EventsOnly if evidence.has_events() => self.events_sheet(evidence),
            AttributionMode::VotesOnly if evidence.has_votes() => Self::votes_sheet(evidence),
            AttributionMode::Hybrid if evidence.has_events() || evidence.has_votes() => {
                self.hybrid_sheet(evidence)
            }
            _ => ScoreSheet::equal_distribution(evidence),
        }
    }
}

fn email_index(evidence: &NormalizedEvidence) -> HashMap<&str, usize> {
    evidence
        .contributors
        .iter()
        .enumerate()
        .map(|(i, c)| (c.email.as_str(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::WEIGHT_SUM_TOLERANCE;
    use crate::contributor::{Contributor, TeamVote};

    fn team() -> Vec<Contributor> {
        vec![
            Contributor::new("alice@x.io", "Alice"),
            Contributor::new("bob@x.io", "Bob"),
            Contributor::new("carol@x.io", "Carol"),
        ]
    }

    fn score(mode: AttributionMode, evidence: &NormalizedEvidence) -> Attribution {
        let scorer = EvidenceScorer::new(mode, ContributionWeights::default());
        compute_attribution(evidence, &scorer)
    }

    #[test]
    fn test_code_base_score() {
        let event = ContributionEvent::new("a", ContributionType::Code)
            .with_lines(250)
            .with_hours(16.0)
            .with_complexity(1.5);
        // min(2.5, 5) * min(2, 3) * 1.5 = 7.5
        assert!((event_base_score(&event) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_code_base_score_caps() {
        let event = ContributionEvent::new("a", ContributionType::Code)
            .with_lines(10_000)
            .with_hours(100.0);
        // 5.0 * 3.0 * 1.0
        assert!((event_base_score(&event) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_per_type_base_scores() {
        let design = ContributionEvent::new("a", ContributionType::Design).with_hours(8.0);
        let review = ContributionEvent::new("a", ContributionType::Review).with_hours(10.0);
        let docs = ContributionEvent::new("a", ContributionType::Documentation).with_hours(4.0);
        let testing = ContributionEvent::new("a", ContributionType::Testing)
            .with_hours(40.0)
            .with_complexity(2.0);

        assert!((event_base_score(&design) - 2.0).abs() < 1e-12);
        assert!((event_base_score(&review) - 2.0).abs() < 1e-12);
        assert!((event_base_score(&docs) - 1.0).abs() < 1e-12);
        assert!((event_base_score(&testing) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_hours_scores_zero() {
        let event = ContributionEvent::new("a", ContributionType::Code)
            .with_lines(500)
            .with_complexity(3.0);
        assert_eq!(event_base_score(&event), 0.0);

        let design = ContributionEvent::new("a", ContributionType::Design).with_complexity(2.5);
        assert_eq!(event_base_score(&design), 0.0);
    }

    #[test]
    fn test_events_only_weights_and_breakdown() {
        let evidence = NormalizedEvidence::with_contributors(team()[..2].to_vec()).with_events(vec![
            // 2.0 * 1.0 * 1.0 * 0.4 = 0.8
            ContributionEvent::new("alice@x.io", ContributionType::Code)
                .with_lines(200)
                .with_hours(8.0),
            // 2.0 * 1.0 * 0.15 = 0.3
            ContributionEvent::new("bob@x.io", ContributionType::Review).with_hours(4.0),
            // 1.0 * 1.0 * 0.1 = 0.1
            ContributionEvent::new("bob@x.io", ContributionType::Documentation).with_hours(4.0),
        ]);

        let result = score(AttributionMode::EventsOnly, &evidence);

        assert_eq!(result.methodology, "Event-based attribution using contribution data");
        assert_eq!(result.confidence_score, EVENTS_FULL_CONFIDENCE);
        assert!((result.weight_of("alice@x.io") - 0.8 / 1.2).abs() < 1e-12);
        assert!((result.weight_of("bob@x.io") - 0.4 / 1.2).abs() < 1e-12);

        let bob = result.get("bob@x.io").unwrap();
        assert_eq!(bob.breakdown.len(), 5);
        assert!((bob.breakdown["review"] - 0.3).abs() < 1e-12);
        assert_eq!(bob.breakdown["code"], 0.0);
        assert!(bob.rationale.starts_with("Breakdown: review: 0.30, documentation: 0.10"));

        // Highest weight first
        assert_eq!(result.attributions[0].contributor_email, "alice@x.io");
    }

    #[test]
    fn test_custom_weight_table() {
        let evidence = NormalizedEvidence::with_contributors(team()[..2].to_vec()).with_events(vec![
            ContributionEvent::new("alice@x.io", ContributionType::Design).with_hours(4.0),
            ContributionEvent::new("bob@x.io", ContributionType::Testing).with_hours(4.0),
        ]);
        let weights = ContributionWeights {
            design: 0.5,
            testing: 0.5,
            ..ContributionWeights::default()
        };
        let scorer = EvidenceScorer::new(AttributionMode::EventsOnly, weights);
        let result = compute_attribution(&evidence, &scorer);

        assert!((result.weight_of("alice@x.io") - 0.5).abs() < 1e-12);
        assert!((result.weight_of("bob@x.io") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_events_partial_confidence() {
        let evidence = NormalizedEvidence::with_contributors(team()).with_events(vec![
            ContributionEvent::new("alice@x.io", ContributionType::Design).with_hours(4.0),
        ]);
        let result = score(AttributionMode::EventsOnly, &evidence);
        assert_eq!(result.confidence_score, EVENTS_PARTIAL_CONFIDENCE);
        assert!((result.weight_of("alice@x.io") - 1.0).abs() < 1e-12);
        assert_eq!(result.weight_of("bob@x.io"), 0.0);
    }

    #[test]
    fn test_zero_scoring_events_fall_back_to_equal_weights() {
        let evidence = NormalizedEvidence::with_contributors(team()[..2].to_vec()).with_events(vec![
            ContributionEvent::new("alice@x.io", ContributionType::Code).with_lines(100),
            ContributionEvent::new("bob@x.io", ContributionType::Review),
        ]);
        let result = score(AttributionMode::EventsOnly, &evidence);

        // Still the events branch, but normalization splits evenly
        assert_eq!(result.confidence_score, EVENTS_FULL_CONFIDENCE);
        assert!((result.weight_of("alice@x.io") - 0.5).abs() < 1e-12);
        assert!((result.weight_of("bob@x.io") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_votes_only_averages() {
        let evidence = NormalizedEvidence::with_contributors(team()[..2].to_vec()).with_votes(vec![
            TeamVote::new("bob@x.io", "alice@x.io", 0.8),
            TeamVote::new("carol@x.io", "alice@x.io", 0.4),
            TeamVote::new("alice@x.io", "bob@x.io", 0.4),
        ]);
        let result = score(AttributionMode::VotesOnly, &evidence);

        // alice mean 0.6, bob mean 0.4
        assert!((result.weight_of("alice@x.io") - 0.6).abs() < 1e-12);
        assert!((result.weight_of("bob@x.io") - 0.4).abs() < 1e-12);
        assert_eq!(result.confidence_score, VOTES_FULL_CONFIDENCE);
        assert!(result.get("alice@x.io").unwrap().breakdown.is_empty());
    }

    #[test]
    fn test_votes_partial_confidence() {
        let evidence = NormalizedEvidence::with_contributors(team())
            .with_votes(vec![TeamVote::new("bob@x.io", "alice@x.io", 1.0)]);
        let result = score(AttributionMode::VotesOnly, &evidence);
        assert_eq!(result.confidence_score, VOTES_PARTIAL_CONFIDENCE);
    }

    #[test]
    fn test_hybrid_combines_raw_scores() {
        let evidence = NormalizedEvidence::with_contributors(team()[..2].to_vec())
            .with_events(vec![
                // raw 0.8
                ContributionEvent::new("alice@x.io", ContributionType::Code)
                    .with_lines(200)
                    .with_hours(8.0),
            ])
            .with_votes(vec![
                TeamVote::new("alice@x.io", "bob@x.io", 1.0),
                TeamVote::new("bob@x.io", "alice@x.io", 0.5),
            ]);
        let result = score(AttributionMode::Hybrid, &evidence);

        // alice: 0.6*0.8 + 0.4*0.5 = 0.68; bob: 0.6*0 + 0.4*1.0 = 0.4
        let total = 0.68 + 0.4;
        assert!((result.weight_of("alice@x.io") - 0.68 / total).abs() < 1e-12);
        assert!((result.weight_of("bob@x.io") - 0.4 / total).abs() < 1e-12);
        assert_eq!(result.confidence_score, HYBRID_FULL_CONFIDENCE);
        assert_eq!(result.get("bob@x.io").unwrap().breakdown.len(), 5);
    }

    #[test]
    fn test_hybrid_votes_alone() {
        let evidence = NormalizedEvidence::with_contributors(team()[..2].to_vec())
            .with_votes(vec![TeamVote::new("alice@x.io", "bob@x.io", 1.0)]);
        let result = score(AttributionMode::Hybrid, &evidence);

        assert_eq!(result.confidence_score, HYBRID_PARTIAL_CONFIDENCE);
        assert!((result.weight_of("bob@x.io") - 1.0).abs() < 1e-12);
        assert!(result.get("bob@x.io").unwrap().breakdown.is_empty());
    }

    #[test]
    fn test_zero_evidence_fallback() {
        let evidence = NormalizedEvidence::with_contributors(team());
        let result = score(AttributionMode::Hybrid, &evidence);

        assert_eq!(result.methodology, FALLBACK_METHODOLOGY);
        assert_eq!(result.confidence_score, FALLBACK_CONFIDENCE);
        for a in &result.attributions {
            assert!((a.weight - 1.0 / 3.0).abs() < 1e-12);
            assert!(a.rationale.starts_with("Attributed 33.3% based on equal distribution"));
        }
        // Stable order for equal weights
        assert_eq!(result.attributions[0].contributor_email, "alice@x.io");
    }

    #[test]
    fn test_mode_without_its_evidence_falls_back() {
        let evidence = NormalizedEvidence::with_contributors(team())
            .with_votes(vec![TeamVote::new("alice@x.io", "bob@x.io", 1.0)]);
        let result = score(AttributionMode::EventsOnly, &evidence);
        assert_eq!(result.confidence_score, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_empty_contributors() {
        let result = score(AttributionMode::Hybrid, &NormalizedEvidence::default());
        assert!(result.attributions.is_empty());
        assert_eq!(result.total_weight, 0.0);
        assert_eq!(result.methodology, NO_CONTRIBUTORS_METHODOLOGY);
        assert_eq!(result.confidence_score, 0.0);
    }

    #[test]
    fn test_total_weight_matches_sum() {
        let evidence = NormalizedEvidence::with_contributors(team()).with_events(vec![
            ContributionEvent::new("alice@x.io", ContributionType::Design).with_hours(3.0),
            ContributionEvent::new("bob@x.io", ContributionType::Review).with_hours(1.0),
            ContributionEvent::new("carol@x.io", ContributionType::Testing).with_hours(7.0),
        ]);
        let result = score(AttributionMode::EventsOnly, &evidence);
        let sum: f64 = result.attributions.iter().map(|a| a.weight).sum();
        assert_eq!(result.total_weight, sum);
        assert!((sum - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
    }
}
