//! Validation results and the combined report

use serde::Serialize;
use ssbmax_domain::{EntryType, Olq, OlqCategory};
use std::collections::BTreeMap;
use std::fmt;

/// Limitations found in a score set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LimitationResult {
    /// Number of limitations
    pub count: usize,
    /// Qualities at limitation, in declaration order
    pub limited_olqs: Vec<Olq>,
    /// Their scores
    pub limitation_scores: BTreeMap<Olq, u8>,
}

/// Consistency of one factor's scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorConsistencyDetail {
    /// Factor checked
    pub category: OlqCategory,
    /// Best (lowest) score in the factor
    pub min_score: u8,
    /// Worst (highest) score in the factor
    pub max_score: u8,
    /// `max_score - min_score`
    pub variation: u8,
    /// Whether the spread is within the factor's tolerance
    pub is_consistent: bool,
}

/// Consistency across all factors with at least two scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyResult {
    /// No factor exceeded its tolerance
    pub is_consistent: bool,
    /// Factors that exceeded their tolerance
    pub inconsistent_factors: Vec<OlqCategory>,
    /// Largest spread seen in any factor
    pub max_variation_found: u8,
    /// Per-factor details
    pub details: BTreeMap<OlqCategory, FactorConsistencyDetail>,
}

impl Default for ConsistencyResult {
    fn default() -> Self {
        Self {
            is_consistent: true,
            inconsistent_factors: Vec::new(),
            max_variation_found: 0,
            details: BTreeMap::new(),
        }
    }
}

/// Weaknesses in critical qualities
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CriticalWeaknessResult {
    /// Critical qualities at limitation
    pub critical_weaknesses: Vec<Olq>,
    /// Their scores
    pub weakness_scores: BTreeMap<Olq, u8>,
    /// Factor II average, when any Factor II quality was scored
    pub factor_ii_average: Option<f64>,
    /// Factor II average is at the auto-reject level
    pub has_auto_reject_weakness: bool,
    /// Factor II average is at the caution level (but below auto-reject)
    pub factor_ii_caution: bool,
    /// Explanation for the auto-reject
    pub auto_reject_reason: Option<String>,
}

/// Overall selection verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    /// All criteria pass
    Recommended,
    /// Borderline: inconsistent factors or weak critical qualities
    Doubtful,
    /// Too many limitations or Factor II at limitation
    NotRecommended,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Recommendation::Recommended => "Recommended",
            Recommendation::Doubtful => "Doubtful",
            Recommendation::NotRecommended => "Not Recommended",
        };
        f.write_str(s)
    }
}

/// Verdict with the reasons that led to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// Verdict
    pub recommendation: Recommendation,
    /// Human-readable reasons (empty for a clean pass)
    pub reasons: Vec<String>,
}

/// Every check in one report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Limitation count
    pub limitation_result: LimitationResult,
    /// Factor consistency
    pub consistency_result: ConsistencyResult,
    /// Critical-quality weaknesses
    pub critical_weakness_result: CriticalWeaknessResult,
    /// Average per factor that had scores
    pub factor_averages: BTreeMap<OlqCategory, f64>,
    /// Verdict
    pub recommendation_result: RecommendationResult,
    /// Scores that were validated
    pub original_scores: BTreeMap<Olq, u8>,
    /// Entry type the verdict applies to
    pub entry_type: EntryType,
}

impl ValidationReport {
    /// Whether the verdict is a clean pass
    pub fn is_recommended(&self) -> bool {
        self.recommendation_result.recommendation == Recommendation::Recommended
    }

    /// Plain-text summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Recommendation: {}", self.recommendation_result.recommendation),
            format!(
                "Limitations: {} (max {} for {})",
                self.limitation_result.count,
                self.entry_type.max_limitations(),
                self.entry_type
            ),
        ];

        for (category, average) in &self.factor_averages {
            lines.push(format!(
                "  Factor {} ({}): {:.1}",
                category.factor_number(),
                category.factor_name(),
                average
            ));
        }

        if !self.recommendation_result.reasons.is_empty() {
            lines.push("Reasons:".to_string());
            for reason in &self.recommendation_result.reasons {
                lines.push(format!("  - {}", reason));
            }
        }

        lines.join("\n")
    }
}
