//! Per-quality aggregation across test results
//!
//! Everything here is a pure function of its input: aggregating the same
//! dashboard twice yields identical output.

use crate::{CacheMetadata, ProcessedDashboardData};
use ssbmax_domain::{Olq, OlqAnalysisResult, OlqDashboardData};
use std::collections::BTreeMap;

/// Mean score per quality over every result that scored it
///
/// A result without a given quality does not count toward that quality's
/// denominator. Qualities no result scored are absent from the map.
pub fn average_olq_scores(results: &[&OlqAnalysisResult]) -> BTreeMap<Olq, f64> {
    let mut totals: BTreeMap<Olq, (u32, u32)> = BTreeMap::new();

    for result in results {
        for (olq, score) in result.olq_scores() {
            let (sum, count) = totals.entry(*olq).or_insert((0, 0));
            *sum += u32::from(score.score());
            *count += 1;
        }
    }

    totals
        .into_iter()
        .map(|(olq, (sum, count))| (olq, f64::from(sum) / f64::from(count)))
        .collect()
}

/// The `n` lowest averages (strongest qualities), best first
///
/// Ties keep declaration order. Returns fewer than `n` entries when fewer
/// qualities were scored.
pub fn top_olqs(averages: &BTreeMap<Olq, f64>, n: usize) -> Vec<(Olq, f64)> {
    let mut ranked: Vec<(Olq, f64)> = averages.iter().map(|(o, a)| (*o, *a)).collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(n);
    ranked
}

/// The `n` highest averages (qualities to improve), worst first
///
/// Same tie and length rules as [`top_olqs`]. Once at least `2 * n`
/// qualities are scored, qualities already ranked by [`top_olqs`] are
/// skipped so the two lists never share an entry.
pub fn improvement_olqs(averages: &BTreeMap<Olq, f64>, n: usize) -> Vec<(Olq, f64)> {
    let excluded: Vec<Olq> = if averages.len() >= n.saturating_mul(2) {
        top_olqs(averages, n).into_iter().map(|(o, _)| o).collect()
    } else {
        Vec::new()
    };

    let mut ranked: Vec<(Olq, f64)> = averages
        .iter()
        .filter(|(o, _)| !excluded.contains(o))
        .map(|(o, a)| (*o, *a))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Unweighted mean of the per-quality averages
pub fn overall_average(averages: &BTreeMap<Olq, f64>) -> Option<f64> {
    if averages.is_empty() {
        return None;
    }
    Some(averages.values().sum::<f64>() / averages.len() as f64)
}

/// Aggregate a dashboard into its processed view
///
/// Cache metadata is left at its default; the service fills it in.
pub fn process(dashboard: OlqDashboardData, ranking_size: usize) -> ProcessedDashboardData {
    let average_olq_scores = average_olq_scores(&dashboard.analysis_results());
    let top = top_olqs(&average_olq_scores, ranking_size);
    let improvement = improvement_olqs(&average_olq_scores, ranking_size);
    let overall_average_score = overall_average(&average_olq_scores);

    ProcessedDashboardData {
        dashboard,
        average_olq_scores,
        top_olqs: top,
        improvement_olqs: improvement,
        overall_average_score,
        cache_metadata: CacheMetadata::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssbmax_domain::{OlqScore, SubmissionId, TestType};

    fn result(test_type: TestType, scores: &[(Olq, u8)]) -> OlqAnalysisResult {
        let scores = scores
            .iter()
            .map(|(olq, s)| (*olq, OlqScore::new(*s, 80, "observed").unwrap()))
            .collect();
        OlqAnalysisResult::new(SubmissionId::generate(), test_type, scores, 0, 90).unwrap()
    }

    fn averages(entries: &[(Olq, f64)]) -> BTreeMap<Olq, f64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_average_across_results() {
        let tat = result(
            TestType::Tat,
            &[(Olq::EffectiveIntelligence, 3), (Olq::ReasoningAbility, 4)],
        );
        let wat = result(
            TestType::Wat,
            &[(Olq::EffectiveIntelligence, 5), (Olq::ReasoningAbility, 6)],
        );

        let avg = average_olq_scores(&[&tat, &wat]);
        assert_eq!(avg.len(), 2);
        assert_eq!(avg[&Olq::EffectiveIntelligence], 4.0);
        assert_eq!(avg[&Olq::ReasoningAbility], 5.0);
    }

    #[test]
    fn test_absent_key_excluded_from_denominator() {
        let tat = result(
            TestType::Tat,
            &[(Olq::EffectiveIntelligence, 4), (Olq::Courage, 8)],
        );
        let wat = result(TestType::Wat, &[(Olq::EffectiveIntelligence, 6)]);

        let avg = average_olq_scores(&[&tat, &wat]);
        assert_eq!(avg[&Olq::Courage], 8.0);
        assert_eq!(avg[&Olq::EffectiveIntelligence], 5.0);
        assert!(!avg.contains_key(&Olq::Stamina));
    }

    #[test]
    fn test_rankings() {
        let avg = averages(&[
            (Olq::EffectiveIntelligence, 2.0),
            (Olq::ReasoningAbility, 8.0),
            (Olq::OrganizingAbility, 3.0),
            (Olq::PowerOfExpression, 4.0),
        ]);

        let top: Vec<Olq> = top_olqs(&avg, 3).into_iter().map(|(o, _)| o).collect();
        assert_eq!(
            top,
            vec![
                Olq::EffectiveIntelligence,
                Olq::OrganizingAbility,
                Olq::PowerOfExpression
            ]
        );

        let improve: Vec<Olq> = improvement_olqs(&avg, 3)
            .into_iter()
            .map(|(o, _)| o)
            .collect();
        assert_eq!(
            improve,
            vec![
                Olq::ReasoningAbility,
                Olq::PowerOfExpression,
                Olq::OrganizingAbility
            ]
        );
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let avg = averages(&[
            (Olq::Stamina, 5.0),
            (Olq::Initiative, 5.0),
            (Olq::EffectiveIntelligence, 5.0),
            (Olq::Courage, 5.0),
        ]);

        let top: Vec<Olq> = top_olqs(&avg, 3).into_iter().map(|(o, _)| o).collect();
        assert_eq!(
            top,
            vec![Olq::EffectiveIntelligence, Olq::Initiative, Olq::Courage]
        );
        let improve: Vec<Olq> = improvement_olqs(&avg, 3)
            .into_iter()
            .map(|(o, _)| o)
            .collect();
        assert_eq!(improve, top);
    }

    #[test]
    fn test_tied_rankings_disjoint_with_six_scored() {
        let avg = averages(&[
            (Olq::EffectiveIntelligence, 5.0),
            (Olq::ReasoningAbility, 5.0),
            (Olq::OrganizingAbility, 5.0),
            (Olq::PowerOfExpression, 5.0),
            (Olq::SocialAdjustment, 5.0),
            (Olq::Cooperation, 5.0),
        ]);

        let top: Vec<Olq> = top_olqs(&avg, 3).into_iter().map(|(o, _)| o).collect();
        assert_eq!(
            top,
            vec![
                Olq::EffectiveIntelligence,
                Olq::ReasoningAbility,
                Olq::OrganizingAbility
            ]
        );
        let improve: Vec<Olq> = improvement_olqs(&avg, 3)
            .into_iter()
            .map(|(o, _)| o)
            .collect();
        assert_eq!(
            improve,
            vec![
                Olq::PowerOfExpression,
                Olq::SocialAdjustment,
                Olq::Cooperation
            ]
        );
    }

    #[test]
    fn test_partial_ties_disjoint() {
        let avg = averages(&[
            (Olq::EffectiveIntelligence, 3.0),
            (Olq::ReasoningAbility, 6.0),
            (Olq::OrganizingAbility, 6.0),
            (Olq::PowerOfExpression, 6.0),
            (Olq::SocialAdjustment, 6.0),
            (Olq::Cooperation, 6.0),
            (Olq::Courage, 9.0),
        ]);

        let top = top_olqs(&avg, 3);
        let improve = improvement_olqs(&avg, 3);
        assert_eq!(improve.len(), 3);
        assert_eq!(improve[0], (Olq::Courage, 9.0));
        assert!(improve.iter().all(|entry| !top.contains(entry)));
    }

    #[test]
    fn test_fewer_than_n_not_padded() {
        let avg = averages(&[(Olq::Courage, 6.0)]);
        assert_eq!(top_olqs(&avg, 3), vec![(Olq::Courage, 6.0)]);
        assert_eq!(improvement_olqs(&avg, 3), vec![(Olq::Courage, 6.0)]);
    }

    #[test]
    fn test_overall_average_is_mean_of_averages() {
        let avg = averages(&[
            (Olq::EffectiveIntelligence, 4.0),
            (Olq::ReasoningAbility, 5.0),
            (Olq::Courage, 9.0),
        ]);
        assert_eq!(overall_average(&avg), Some(6.0));
        assert_eq!(overall_average(&BTreeMap::new()), None);
    }

    #[test]
    fn test_process_empty_dashboard() {
        let processed = process(OlqDashboardData::empty("cadet-1"), 3);
        assert!(processed.average_olq_scores.is_empty());
        assert!(processed.top_olqs.is_empty());
        assert!(processed.improvement_olqs.is_empty());
        assert_eq!(processed.overall_average_score, None);
        assert!(!processed.has_scores());
    }

    #[test]
    fn test_process_is_idempotent() {
        let mut dashboard = OlqDashboardData::empty("cadet-1");
        dashboard.phase2_results.tat_result = Some(result(
            TestType::Tat,
            &[(Olq::EffectiveIntelligence, 3), (Olq::Determination, 7)],
        ));
        dashboard.phase2_results.interview_result = Some(result(
            TestType::Interview,
            &[(Olq::Determination, 5), (Olq::SelfConfidence, 6)],
        ));

        let first = process(dashboard.clone(), 3);
        let second = process(dashboard, 3);
        assert_eq!(first, second);
        assert_eq!(first.average_olq_scores[&Olq::Determination], 6.0);
        assert_eq!(first.overall_average_score, Some(5.0));
    }

    #[test]
    fn test_process_respects_ranking_size() {
        let mut dashboard = OlqDashboardData::empty("cadet-1");
        dashboard.phase2_results.srt_result = Some(result(
            TestType::Srt,
            &[
                (Olq::EffectiveIntelligence, 3),
                (Olq::Initiative, 4),
                (Olq::Courage, 9),
            ],
        ));

        let processed = process(dashboard, 1);
        assert_eq!(processed.top_olqs, vec![(Olq::EffectiveIntelligence, 3.0)]);
        assert_eq!(processed.improvement_olqs, vec![(Olq::Courage, 9.0)]);
    }
}
