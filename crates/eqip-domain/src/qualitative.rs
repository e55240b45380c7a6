//! Qualitative attribution heuristics
//!
//! Scores contributors from free-text narratives instead of structured
//! events. The keyword vocabulary is injected so it can be tuned without
//! touching the scoring logic. Output has the same shape as the numeric
//! scorer, so the allocation engine cannot tell the two apart.

use crate::attribution_computation::{RawScore, ScoreSheet};
use crate::evidence::NormalizedEvidence;
use crate::traits::AttributionScorer;
use serde::{Deserialize, Serialize};

/// Words above which a description counts as detailed
pub const DETAILED_WORD_THRESHOLD: usize = 20;
/// Words above which a description counts as comprehensive
pub const COMPREHENSIVE_WORD_THRESHOLD: usize = 50;

/// Minimum per-contributor score before normalization
pub const MIN_QUALITATIVE_SCORE: f64 = 1.0;

/// Confidence when every contributor supplied a description
pub const QUALITATIVE_FULL_CONFIDENCE: f64 = 0.6;
/// Confidence when only some contributors supplied a description
pub const QUALITATIVE_PARTIAL_CONFIDENCE: f64 = 0.4;

/// A category of keywords and the points each hit is worth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    /// Keywords, matched case-insensitively anywhere in the text
    pub keywords: Vec<String>,

    /// Points added per keyword found
    pub points_per_hit: f64,
}

impl KeywordSet {
    /// Create a keyword set
    pub fn new(keywords: &[&str], points_per_hit: f64) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            points_per_hit,
        }
    }

    /// Number of distinct keywords present in already-lowercased text
    pub fn hits(&self, lowercase_text: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| lowercase_text.contains(k.to_lowercase().as_str()))
            .count()
    }
}

/// The full vocabulary used by the qualitative scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordVocabulary {
    /// Leadership and initiative
    pub leadership: KeywordSet,
    /// Technical complexity and expertise
    pub technical: KeywordSet,
    /// Time and effort investment
    pub effort: KeywordSet,
    /// Creative and inventive input
    pub creative: KeywordSet,
    /// Impact on the project
    pub impact: KeywordSet,
}

impl Default for KeywordVocabulary {
    fn default() -> Self {
        Self {
            leadership: KeywordSet::new(
                &["led", "founded", "initiated", "managed", "directed", "coordinated", "organized"],
                1.5,
            ),
            technical: KeywordSet::new(
                &[
                    "architected", "designed", "implemented", "developed", "engineered",
                    "algorithm", "complex", "advanced", "technical",
                ],
                1.2,
            ),
            effort: KeywordSet::new(
                &[
                    "hours", "weeks", "months", "full-time", "extensive", "significant",
                    "substantial", "overtime", "dedicated", "intensive", "thorough",
                    "comprehensive",
                ],
                1.0,
            ),
            creative: KeywordSet::new(
                &["created", "invented", "innovated", "conceived", "originated", "pioneered", "breakthrough"],
                1.8,
            ),
            impact: KeywordSet::new(
                &["critical", "essential", "key", "core", "fundamental", "crucial", "vital", "primary"],
                1.3,
            ),
        }
    }
}

impl KeywordVocabulary {
    /// Check that every category awards finite, non-negative points
    pub fn validate(&self) -> Result<(), String> {
        let sets = [
            ("leadership", &self.leadership),
            ("technical", &self.technical),
            ("effort", &self.effort),
            ("creative", &self.creative),
            ("impact", &self.impact),
        ];
        for (name, set) in sets {
            if !set.points_per_hit.is_finite() || set.points_per_hit < 0.0 {
                return Err(format!("{} points_per_hit must be finite and non-negative", name));
            }
        }
        Ok(())
    }
}

/// Component scores for one description
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QualitativeAnalysis {
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Base score from description length
    pub base: f64,
    /// Leadership keywords found
    pub leadership_hits: usize,
    /// Technical keywords found
    pub technical_hits: usize,
    /// Time/effort keywords found
    pub effort_hits: usize,
    /// Creative keywords found
    pub creative_hits: usize,
    /// Impact keywords found
    pub impact_hits: usize,
    /// Points from leadership keywords
    pub leadership: f64,
    /// Points from technical keywords
    pub technical: f64,
    /// Points from time/effort keywords
    pub effort: f64,
    /// Points from creative keywords
    pub creative: f64,
    /// Points from impact keywords
    pub impact: f64,
}

impl QualitativeAnalysis {
    /// Sum of all components (before the floor)
    pub fn total(&self) -> f64 {
        self.base + self.leadership + self.technical + self.effort + self.creative + self.impact
    }

    /// Score used for normalization, floored at [`MIN_QUALITATIVE_SCORE`]
    pub fn score(&self) -> f64 {
        self.total().max(MIN_QUALITATIVE_SCORE)
    }

    fn key_factors(&self) -> Vec<String> {
        let mut factors = Vec::new();
        factors.push(if self.word_count > COMPREHENSIVE_WORD_THRESHOLD {
            format!("Comprehensive description ({} words)", self.word_count)
        } else if self.word_count > DETAILED_WORD_THRESHOLD {
            format!("Detailed description ({} words)", self.word_count)
        } else {
            format!("Basic description ({} words)", self.word_count)
        });
        if self.leadership_hits > 0 {
            factors.push(format!("Leadership role identified ({} indicators)", self.leadership_hits));
        }
        if self.technical_hits > 0 {
            factors.push(format!("Technical expertise demonstrated ({} technical terms)", self.technical_hits));
        }
        if self.effort_hits > 0 {
            factors.push(format!("Significant time investment indicated ({} effort indicators)", self.effort_hits));
        }
        if self.creative_hits > 0 {
            factors.push(format!("Creative innovation recognized ({} innovation indicators)", self.creative_hits));
        }
        if self.impact_hits > 0 {
            factors.push(format!("High project impact identified ({} impact terms)", self.impact_hits));
        }
        factors
    }
}

/// Analyze one description against a vocabulary
pub fn analyze_description(text: &str, vocabulary: &KeywordVocabulary) -> QualitativeAnalysis {
    let word_count = text.split_whitespace().count();
    let lower = text.to_lowercase();

    let base = if word_count > COMPREHENSIVE_WORD_THRESHOLD {
        2.0
    } else if word_count > DETAILED_WORD_THRESHOLD {
        1.5
    } else {
        1.0
    };

    let leadership_hits = vocabulary.leadership.hits(&lower);
    let technical_hits = vocabulary.technical.hits(&lower);
    let effort_hits = vocabulary.effort.hits(&lower);
    let creative_hits = vocabulary.creative.hits(&lower);
    let impact_hits = vocabulary.impact.hits(&lower);

    QualitativeAnalysis {
        word_count,
        base,
        leadership_hits,
        technical_hits,
        effort_hits,
        creative_hits,
        impact_hits,
        leadership: leadership_hits as f64 * vocabulary.leadership.points_per_hit,
        technical: technical_hits as f64 * vocabulary.technical.points_per_hit,
        effort: effort_hits as f64 * vocabulary.effort.points_per_hit,
        creative: creative_hits as f64 * vocabulary.creative.points_per_hit,
        impact: impact_hits as f64 * vocabulary.impact.points_per_hit,
    }
}

/// Scores contributors from their qualitative descriptions
#[derive(Debug, Clone, Default)]
pub struct QualitativeScorer {
    vocabulary: KeywordVocabulary,
}

impl QualitativeScorer {
    /// Create a scorer with a vocabulary
    pub fn new(vocabulary: KeywordVocabulary) -> Self {
        Self { vocabulary }
    }
}

impl AttributionScorer for QualitativeScorer {
    fn score(&self, evidence: &NormalizedEvidence) -> ScoreSheet {
        if evidence.contributors.is_empty() {
            return ScoreSheet::empty();
        }

        let described = evidence
            .contributors
            .iter()
            .filter(|c| evidence.description_for(&c.email).is_some())
            .count();
        if described == 0 {
            return ScoreSheet::equal_distribution(evidence);
        }

        let scores = evidence
            .contributors
            .iter()
            .map(|c| {
                let text = evidence.description_for(&c.email).unwrap_or("");
                let analysis = analyze_description(text, &self.vocabulary);
                let detail = format!(
                    "Qualitative analysis for {}:\n\
                     • Total score: {:.1} points\n\
                     • Components: Base ({:.1}) + Leadership ({:.1}) + Technical ({:.1}) + Time ({:.1}) + Creative ({:.1}) + Impact ({:.1})\n\
                     • Key factors: {}",
                    c.display_name,
                    analysis.score(),
                    analysis.base,
                    analysis.leadership,
                    analysis.technical,
                    analysis.effort,
                    analysis.creative,
                    analysis.impact,
                    analysis.key_factors().join("; "),
                );
                RawScore {
                    email: c.email.clone(),
                    name: c.display_name.clone(),
                    score: analysis.score(),
                    breakdown: Default::default(),
                    detail: Some(detail),
                }
            })
            .collect();

        ScoreSheet {
            scores,
            methodology: "Qualitative text analysis of contributor descriptions".to_string(),
            confidence: if described == evidence.contributor_count() {
                QUALITATIVE_FULL_CONFIDENCE
            } else {
                QUALITATIVE_PARTIAL_CONFIDENCE
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution_computation::{compute_attribution, FALLBACK_CONFIDENCE};
    use crate::contributor::{Contributor, QualitativeDescription};

    #[test]
    fn test_word_count_tiers() {
        let vocab = KeywordVocabulary::default();
        let short = "wrote some docs";
        let detailed = "word ".repeat(21);
        let comprehensive = "word ".repeat(51);
        let exactly_fifty = "word ".repeat(50);

        assert_eq!(analyze_description(short, &vocab).base, 1.0);
        assert_eq!(analyze_description(&detailed, &vocab).base, 1.5);
        assert_eq!(analyze_description(&comprehensive, &vocab).base, 2.0);
        assert_eq!(analyze_description(&exactly_fifty, &vocab).base, 1.5);
    }

    #[test]
    fn test_keyword_hits_case_insensitive() {
        let vocab = KeywordVocabulary::default();
        let analysis = analyze_description(
            "LED the team and Founded the company; Invented the core algorithm",
            &vocab,
        );

        assert_eq!(analysis.leadership_hits, 2);
        assert_eq!(analysis.creative_hits, 1);
        assert_eq!(analysis.technical_hits, 1);
        assert_eq!(analysis.impact_hits, 1);
        let expected = 1.0 + 2.0 * 1.5 + 1.2 + 1.8 + 1.3;
        assert!((analysis.total() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_keyword_counted_once() {
        let vocab = KeywordVocabulary::default();
        let analysis = analyze_description("managed managed managed", &vocab);
        assert_eq!(analysis.leadership_hits, 1);
    }

    #[test]
    fn test_injected_vocabulary() {
        let mut vocab = KeywordVocabulary::default();
        vocab.creative = KeywordSet::new(&["shipped"], 10.0);
        let analysis = analyze_description("Shipped the beta", &vocab);
        assert_eq!(analysis.creative, 10.0);
    }

    #[test]
    fn test_score_floor() {
        let vocab = KeywordVocabulary {
            leadership: KeywordSet::new(&[], 0.0),
            technical: KeywordSet::new(&[], 0.0),
            effort: KeywordSet::new(&[], 0.0),
            creative: KeywordSet::new(&[], 0.0),
            impact: KeywordSet::new(&[], 0.0),
        };
        let analysis = analyze_description("", &vocab);
        assert_eq!(analysis.score(), MIN_QUALITATIVE_SCORE);
    }

    #[test]
    fn test_qualitative_attribution_shape() {
        let evidence = NormalizedEvidence::with_contributors(vec![
            Contributor::new("alice@x.io", "Alice"),
            Contributor::new("bob@x.io", "Bob"),
        ])
        .with_descriptions(vec![
            QualitativeDescription::new("alice@x.io", "Led the project and invented the core idea"),
            QualitativeDescription::new("bob@x.io", "Helped out"),
        ]);

        let scorer = QualitativeScorer::default();
        let result = compute_attribution(&evidence, &scorer);

        assert_eq!(result.confidence_score, QUALITATIVE_FULL_CONFIDENCE);
        assert!((result.total_weight - 1.0).abs() < 1e-9);
        // alice: 1.0 + 1.5 + 1.8 + 1.3 = 5.6; bob: 1.0
        assert!((result.weight_of("alice@x.io") - 5.6 / 6.6).abs() < 1e-12);
        let alice = result.get("alice@x.io").unwrap();
        assert!(alice.breakdown.is_empty());
        assert!(alice.rationale.contains("Leadership role identified"));
        assert!(alice.rationale.contains("Final weight: 84.8%"));
    }

    #[test]
    fn test_partial_descriptions_lower_confidence() {
        let evidence = NormalizedEvidence::with_contributors(vec![
            Contributor::new("alice@x.io", "Alice"),
            Contributor::new("bob@x.io", "Bob"),
        ])
        .with_descriptions(vec![QualitativeDescription::new("alice@x.io", "Did things")]);

        let result = compute_attribution(&evidence, &QualitativeScorer::default());
        assert_eq!(result.confidence_score, QUALITATIVE_PARTIAL_CONFIDENCE);
        assert!((result.weight_of("bob@x.io") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_descriptions_falls_back() {
        let evidence = NormalizedEvidence::with_contributors(vec![
            Contributor::new("alice@x.io", "Alice"),
            Contributor::new("bob@x.io", "Bob"),
        ]);
        let result = compute_attribution(&evidence, &QualitativeScorer::default());
        assert_eq!(result.confidence_score, FALLBACK_CONFIDENCE);
    }
}
