//! Score validation logic

use crate::{
    ConsistencyResult, CriticalWeaknessResult, FactorConsistencyDetail, LimitationResult,
    Recommendation, RecommendationResult, ValidationConfig, ValidationReport, ValidatorError,
};
use ssbmax_domain::{EntryType, Olq, OlqAnalysisResult, OlqCategory};
use std::collections::BTreeMap;

/// Applies the SSB selection rules to OLQ score sets
pub struct ScoreValidator {
    config: ValidationConfig,
}

impl ScoreValidator {
    /// Create a validator with the given configuration
    ///
    /// # Errors
    /// Returns [`ValidatorError::Config`] when the thresholds are invalid
    pub fn new(config: ValidationConfig) -> Result<Self, ValidatorError> {
        config.check()?;
        Ok(Self { config })
    }

    /// Create a validator with the standard SSB rules
    pub fn default_config() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn is_limitation(&self, score: u8) -> bool {
        score >= self.config.limitation_threshold
    }

    /// Count the limitations in a score set
    pub fn count_limitations(&self, scores: &BTreeMap<Olq, u8>) -> LimitationResult {
        let limitation_scores: BTreeMap<Olq, u8> = scores
            .iter()
            .filter(|(_, score)| self.is_limitation(**score))
            .map(|(olq, score)| (*olq, *score))
            .collect();

        LimitationResult {
            count: limitation_scores.len(),
            limited_olqs: limitation_scores.keys().copied().collect(),
            limitation_scores,
        }
    }

    /// Whether the limitations exceed the maximum for the entry type
    pub fn exceeds_max_limitations(
        &self,
        scores: &BTreeMap<Olq, u8>,
        entry_type: EntryType,
    ) -> bool {
        self.count_limitations(scores).count > entry_type.max_limitations() as usize
    }

    /// Check that every factor with two or more scores stays within its tolerance
    pub fn check_factor_consistency(&self, scores: &BTreeMap<Olq, u8>) -> ConsistencyResult {
        let mut result = ConsistencyResult::default();

        for category in OlqCategory::ALL {
            let factor_scores: Vec<u8> = scores
                .iter()
                .filter(|(olq, _)| olq.category() == category)
                .map(|(_, score)| *score)
                .collect();

            if factor_scores.len() < 2 {
                continue;
            }

            let min_score = factor_scores.iter().copied().min().unwrap_or(0);
            let max_score = factor_scores.iter().copied().max().unwrap_or(0);
            let variation = max_score - min_score;
            let is_consistent = variation <= category.max_tick_variation();

            result.max_variation_found = result.max_variation_found.max(variation);
            if !is_consistent {
                result.inconsistent_factors.push(category);
            }
            result.details.insert(
                category,
                FactorConsistencyDetail {
                    category,
                    min_score,
                    max_score,
                    variation,
                    is_consistent,
                },
            );
        }

        result.is_consistent = result.inconsistent_factors.is_empty();
        result
    }

    /// Find critical qualities at limitation and evaluate the Factor II rule
    pub fn detect_critical_weaknesses(&self, scores: &BTreeMap<Olq, u8>) -> CriticalWeaknessResult {
        let weakness_scores: BTreeMap<Olq, u8> = scores
            .iter()
            .filter(|(olq, score)| olq.is_critical() && self.is_limitation(**score))
            .map(|(olq, score)| (*olq, *score))
            .collect();

        let factor_ii_average = average(
            scores
                .iter()
                .filter(|(olq, _)| olq.is_factor_ii())
                .map(|(_, score)| *score),
        );

        let has_auto_reject_weakness = factor_ii_average
            .is_some_and(|avg| avg >= self.config.factor_ii_critical_threshold);
        let factor_ii_caution = !has_auto_reject_weakness
            && factor_ii_average.is_some_and(|avg| avg >= self.config.factor_ii_caution_threshold);

        let auto_reject_reason = factor_ii_average.filter(|_| has_auto_reject_weakness).map(|avg| {
            format!(
                "Factor II (Social Adjustment) average score is {:.1}, which meets or exceeds \
                 the critical threshold of {}. This is an automatic rejection criterion.",
                avg, self.config.factor_ii_critical_threshold
            )
        });

        CriticalWeaknessResult {
            critical_weaknesses: weakness_scores.keys().copied().collect(),
            weakness_scores,
            factor_ii_average,
            has_auto_reject_weakness,
            factor_ii_caution,
            auto_reject_reason,
        }
    }

    /// Average score per factor (factors without scores are omitted)
    pub fn calculate_factor_averages(&self, scores: &BTreeMap<Olq, u8>) -> BTreeMap<OlqCategory, f64> {
        OlqCategory::ALL
            .iter()
            .filter_map(|category| {
                average(
                    scores
                        .iter()
                        .filter(|(olq, _)| olq.category() == *category)
                        .map(|(_, score)| *score),
                )
                .map(|avg| (*category, avg))
            })
            .collect()
    }

    /// Decide the overall verdict
    ///
    /// - Not Recommended: limitations exceed the entry maximum, or Factor II auto-rejects
    /// - Doubtful: inconsistent factors, or a critical quality at limitation
    /// - Recommended: everything else
    pub fn determine_recommendation(
        &self,
        scores: &BTreeMap<Olq, u8>,
        entry_type: EntryType,
    ) -> RecommendationResult {
        let limitations = self.count_limitations(scores);
        let critical = self.detect_critical_weaknesses(scores);
        let consistency = self.check_factor_consistency(scores);
        self.recommend(&limitations, &critical, &consistency, entry_type)
    }

    fn recommend(
        &self,
        limitations: &LimitationResult,
        critical: &CriticalWeaknessResult,
        consistency: &ConsistencyResult,
        entry_type: EntryType,
    ) -> RecommendationResult {
        let mut reasons = Vec::new();

        let exceeds_limitations = self.config.check_limitations
            && limitations.count > entry_type.max_limitations() as usize;
        if exceeds_limitations {
            reasons.push(format!(
                "Candidate has {} limitation(s), exceeding the maximum of {} for {} entry.",
                limitations.count,
                entry_type.max_limitations(),
                entry_type
            ));
        }

        let check_critical = self.config.check_critical_weaknesses;
        let auto_reject = check_critical && critical.has_auto_reject_weakness;
        if auto_reject {
            reasons.push(
                critical
                    .auto_reject_reason
                    .clone()
                    .unwrap_or_else(|| "Factor II overall is at limitation level.".to_string()),
            );
        }

        let weak_critical = check_critical && !critical.critical_weaknesses.is_empty();
        if weak_critical {
            let names: Vec<&str> = critical
                .critical_weaknesses
                .iter()
                .map(|olq| olq.display_name())
                .collect();
            reasons.push(format!("Critical OLQ(s) at limitation: {}", names.join(", ")));
        }

        let caution = check_critical
            && self.config.doubtful_on_factor_ii_caution
            && critical.factor_ii_caution;
        if caution {
            reasons.push(format!(
                "Factor II (Social Adjustment) average {:.1} is at the caution level.",
                critical.factor_ii_average.unwrap_or_default()
            ));
        }

        let inconsistent = self.config.check_factor_consistency && !consistency.is_consistent;
        if inconsistent {
            let names: Vec<&str> = consistency
                .inconsistent_factors
                .iter()
                .map(|c| c.factor_name())
                .collect();
            reasons.push(format!(
                "Score inconsistency detected in factor(s): {}. Maximum variation found: {} ticks.",
                names.join(", "),
                consistency.max_variation_found
            ));
        }

        let recommendation = if exceeds_limitations || auto_reject {
            Recommendation::NotRecommended
        } else if inconsistent || weak_critical || caution {
            Recommendation::Doubtful
        } else {
            Recommendation::Recommended
        };

        tracing::debug!(
            %recommendation,
            limitations = limitations.count,
            %entry_type,
            "Determined recommendation"
        );

        RecommendationResult {
            recommendation,
            reasons,
        }
    }

    /// Run every check and assemble a report
    pub fn validate(&self, scores: &BTreeMap<Olq, u8>, entry_type: EntryType) -> ValidationReport {
        let limitation_result = self.count_limitations(scores);
        let critical_weakness_result = self.detect_critical_weaknesses(scores);
        let consistency_result = if self.config.check_factor_consistency {
            self.check_factor_consistency(scores)
        } else {
            ConsistencyResult::default()
        };
        let recommendation_result = self.recommend(
            &limitation_result,
            &critical_weakness_result,
            &consistency_result,
            entry_type,
        );

        ValidationReport {
            limitation_result,
            consistency_result,
            critical_weakness_result,
            factor_averages: self.calculate_factor_averages(scores),
            recommendation_result,
            original_scores: scores.clone(),
            entry_type,
        }
    }

    /// Validate the scores of one analysis result
    pub fn validate_result(&self, result: &OlqAnalysisResult, entry_type: EntryType) -> ValidationReport {
        self.validate(&result.score_map(), entry_type)
    }
}

fn average(scores: impl Iterator<Item = u8>) -> Option<f64> {
    let (sum, count) = scores.fold((0u32, 0u32), |(sum, count), s| (sum + u32::from(s), count + 1));
    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(Olq, u8)]) -> BTreeMap<Olq, u8> {
        entries.iter().copied().collect()
    }

    fn uniform(score: u8) -> BTreeMap<Olq, u8> {
        Olq::ALL.iter().map(|olq| (*olq, score)).collect()
    }

    #[test]
    fn test_count_limitations() {
        let validator = ScoreValidator::default_config();
        let s = scores(&[
            (Olq::EffectiveIntelligence, 8),
            (Olq::Initiative, 7),
            (Olq::Stamina, 10),
        ]);

        let result = validator.count_limitations(&s);
        assert_eq!(result.count, 2);
        assert_eq!(result.limited_olqs, vec![Olq::EffectiveIntelligence, Olq::Stamina]);
        assert_eq!(result.limitation_scores[&Olq::Stamina], 10);
    }

    #[test]
    fn test_exceeds_max_limitations_depends_on_entry() {
        let validator = ScoreValidator::default_config();
        // five non-critical limitations
        let s = scores(&[
            (Olq::EffectiveIntelligence, 8),
            (Olq::OrganizingAbility, 8),
            (Olq::PowerOfExpression, 8),
            (Olq::Initiative, 8),
            (Olq::Stamina, 8),
        ]);

        assert!(validator.exceeds_max_limitations(&s, EntryType::Nda));
        assert!(!validator.exceeds_max_limitations(&s, EntryType::Ota));
        assert!(!validator.exceeds_max_limitations(&s, EntryType::Graduate));
    }

    #[test]
    fn test_factor_tolerances_differ() {
        let validator = ScoreValidator::default_config();
        // Factor I spread 2 (tolerance 1), Factor III spread 2 (tolerance 2)
        let s = scores(&[
            (Olq::EffectiveIntelligence, 5),
            (Olq::ReasoningAbility, 7),
            (Olq::Initiative, 5),
            (Olq::Liveliness, 7),
        ]);

        let result = validator.check_factor_consistency(&s);
        assert!(!result.is_consistent);
        assert_eq!(result.inconsistent_factors, vec![OlqCategory::Intellectual]);
        assert_eq!(result.max_variation_found, 2);
        assert!(result.details[&OlqCategory::Dynamic].is_consistent);
        assert!(!result.details.contains_key(&OlqCategory::Social));
    }

    #[test]
    fn test_single_score_factor_is_skipped() {
        let validator = ScoreValidator::default_config();
        let result = validator.check_factor_consistency(&scores(&[(Olq::Courage, 9)]));
        assert!(result.is_consistent);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_factor_ii_auto_reject() {
        let validator = ScoreValidator::default_config();
        let s = scores(&[
            (Olq::SocialAdjustment, 8),
            (Olq::Cooperation, 8),
            (Olq::SenseOfResponsibility, 9),
        ]);

        let result = validator.detect_critical_weaknesses(&s);
        assert!(result.has_auto_reject_weakness);
        assert!(!result.factor_ii_caution);
        assert_eq!(result.critical_weaknesses.len(), 3);
        assert!(result
            .auto_reject_reason
            .as_deref()
            .unwrap()
            .contains("Factor II"));

        let verdict = validator.determine_recommendation(&s, EntryType::Ota);
        assert_eq!(verdict.recommendation, Recommendation::NotRecommended);
    }

    #[test]
    fn test_critical_limitation_is_doubtful() {
        let validator = ScoreValidator::default_config();
        let mut s = uniform(6);
        s.insert(Olq::Courage, 8);
        // Factor IV spread 2 stays within tolerance
        let verdict = validator.determine_recommendation(&s, EntryType::Nda);
        assert_eq!(verdict.recommendation, Recommendation::Doubtful);
        assert!(verdict.reasons[0].contains("Courage"));
    }

    #[test]
    fn test_too_many_limitations_not_recommended() {
        let validator = ScoreValidator::default_config();
        let verdict = validator.determine_recommendation(&uniform(8), EntryType::Graduate);
        assert_eq!(verdict.recommendation, Recommendation::NotRecommended);
        assert!(verdict.reasons[0].contains("15 limitation(s)"));
    }

    #[test]
    fn test_clean_candidate_recommended() {
        let validator = ScoreValidator::default_config();
        let report = validator.validate(&uniform(6), EntryType::Nda);
        assert!(report.is_recommended());
        assert!(report.recommendation_result.reasons.is_empty());
        assert_eq!(report.factor_averages.len(), 4);
        assert_eq!(report.factor_averages[&OlqCategory::Social], 6.0);
    }

    #[test]
    fn test_strict_flags_factor_ii_caution() {
        let mut s = uniform(6);
        for olq in Olq::factor_ii_qualities() {
            s.insert(olq, 7);
        }

        let default = ScoreValidator::default_config().validate(&s, EntryType::Nda);
        assert!(default.is_recommended());
        assert!(default.critical_weakness_result.factor_ii_caution);

        let strict = ScoreValidator::new(ValidationConfig::strict())
            .unwrap()
            .validate(&s, EntryType::Nda);
        assert_eq!(
            strict.recommendation_result.recommendation,
            Recommendation::Doubtful
        );
    }

    #[test]
    fn test_permissive_ignores_inconsistency() {
        let s = scores(&[(Olq::EffectiveIntelligence, 4), (Olq::ReasoningAbility, 7)]);
        let validator = ScoreValidator::new(ValidationConfig::permissive()).unwrap();
        let report = validator.validate(&s, EntryType::Nda);
        assert!(report.is_recommended());
        assert!(report.consistency_result.details.is_empty());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = ValidationConfig {
            limitation_threshold: 0,
            ..ValidationConfig::default()
        };
        assert!(ScoreValidator::new(config).is_err());
    }

    #[test]
    fn test_summary_lists_reasons() {
        let validator = ScoreValidator::default_config();
        let report = validator.validate(&uniform(8), EntryType::Nda);
        let summary = report.summary();
        assert!(summary.contains("Recommendation: Not Recommended"));
        assert!(summary.contains("Limitations: 15 (max 4 for NDA)"));
        assert!(summary.contains("Reasons:"));
    }

    #[test]
    fn test_report_serializes() {
        let report = ScoreValidator::default_config().validate(&uniform(6), EntryType::Ota);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["recommendation_result"]["recommendation"], "RECOMMENDED");
        assert_eq!(json["entry_type"], "OTA");
    }
}
