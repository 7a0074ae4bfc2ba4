//! Integration tests for ssbmax-dashboard
//!
//! These tests drive the service and state store through a mock result source.

use ssbmax_dashboard::{
    DashboardConfig, DashboardError, DashboardService, DashboardState, DashboardStore,
};
use ssbmax_domain::traits::ResultSource;
use ssbmax_domain::{
    AnalysisStatus, GtoTestType, OirTestResult, Olq, OlqAnalysisResult, OlqScore, PpdtSubmission,
    PsychTest, SubmissionId, TestType,
};
use std::cell::Cell;
use std::collections::BTreeMap;

/// In-memory source that counts OIR fetches (one per dashboard load)
#[derive(Default)]
struct MockSource {
    oir: Option<OirTestResult>,
    ppdt: Option<(PpdtSubmission, OlqAnalysisResult)>,
    psych: BTreeMap<PsychTest, OlqAnalysisResult>,
    gto: BTreeMap<GtoTestType, OlqAnalysisResult>,
    interview: Option<OlqAnalysisResult>,
    fetches: Cell<usize>,
    failing: Cell<bool>,
}

impl ResultSource for MockSource {
    type Error = String;

    fn latest_oir_result(&self, _user_id: &str) -> Result<Option<OirTestResult>, Self::Error> {
        if self.failing.get() {
            return Err("network unavailable".to_string());
        }
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.oir.clone())
    }

    fn latest_ppdt_submission(
        &self,
        _user_id: &str,
    ) -> Result<Option<PpdtSubmission>, Self::Error> {
        Ok(self.ppdt.as_ref().map(|(s, _)| s.clone()))
    }

    fn ppdt_result(
        &self,
        _user_id: &str,
        submission_id: &SubmissionId,
    ) -> Result<Option<OlqAnalysisResult>, Self::Error> {
        Ok(self
            .ppdt
            .as_ref()
            .filter(|(s, _)| &s.submission_id == submission_id)
            .map(|(_, r)| r.clone()))
    }

    fn latest_psych_result(
        &self,
        _user_id: &str,
        test: PsychTest,
    ) -> Result<Option<OlqAnalysisResult>, Self::Error> {
        Ok(self.psych.get(&test).cloned())
    }

    fn latest_gto_result(
        &self,
        _user_id: &str,
        test: GtoTestType,
    ) -> Result<Option<OlqAnalysisResult>, Self::Error> {
        Ok(self.gto.get(&test).cloned())
    }

    fn latest_interview_result(
        &self,
        _user_id: &str,
    ) -> Result<Option<OlqAnalysisResult>, Self::Error> {
        Ok(self.interview.clone())
    }
}

fn analysis(test_type: TestType, scores: &[(Olq, u8)]) -> OlqAnalysisResult {
    let scores = scores
        .iter()
        .map(|(olq, s)| (*olq, OlqScore::new(*s, 75, "assessor note").unwrap()))
        .collect();
    OlqAnalysisResult::new(SubmissionId::generate(), test_type, scores, 1_000, 80).unwrap()
}

fn oir() -> OirTestResult {
    OirTestResult {
        test_id: "oir-1".to_string(),
        session_id: "session-1".to_string(),
        total_questions: 50,
        correct_answers: 40,
        percentage_score: 80.0,
        completed_at: 1_000,
    }
}

fn populated_source() -> MockSource {
    let mut source = MockSource {
        oir: Some(oir()),
        ..MockSource::default()
    };
    source.psych.insert(
        PsychTest::Tat,
        analysis(
            TestType::Tat,
            &[(Olq::EffectiveIntelligence, 3), (Olq::ReasoningAbility, 4)],
        ),
    );
    source.psych.insert(
        PsychTest::Wat,
        analysis(
            TestType::Wat,
            &[(Olq::EffectiveIntelligence, 5), (Olq::ReasoningAbility, 6)],
        ),
    );
    source.gto.insert(
        GtoTestType::GroupDiscussion,
        analysis(TestType::GtoGd, &[(Olq::Initiative, 8)]),
    );
    source
}

#[test]
fn test_load_aggregates_results() {
    let service = DashboardService::default_config(populated_source());
    let processed = service.load("cadet-1", false).unwrap();

    assert_eq!(processed.dashboard.user_id, "cadet-1");
    assert_eq!(processed.dashboard.completed_tests_count(), 4);
    assert_eq!(processed.average_olq_scores[&Olq::EffectiveIntelligence], 4.0);
    assert_eq!(processed.average_olq_scores[&Olq::ReasoningAbility], 5.0);
    assert_eq!(processed.average_olq_scores[&Olq::Initiative], 8.0);
    assert_eq!(processed.top_olqs[0], (Olq::EffectiveIntelligence, 4.0));
    assert_eq!(processed.improvement_olqs[0], (Olq::Initiative, 8.0));
    assert_eq!(processed.overall_average_score, Some(17.0 / 3.0));
    assert!(!processed.cache_metadata.is_cached);
}

#[test]
fn test_ppdt_result_follows_submission() {
    let submission = PpdtSubmission {
        submission_id: SubmissionId::from_string("ppdt-7").unwrap(),
        status: AnalysisStatus::Completed,
        submitted_at: 500,
    };
    let source = MockSource {
        ppdt: Some((
            submission,
            analysis(TestType::Ppdt, &[(Olq::PowerOfExpression, 4)]),
        )),
        ..MockSource::default()
    };

    let service = DashboardService::default_config(source);
    let processed = service.load("cadet-1", false).unwrap();

    assert!(processed.dashboard.phase1_results.ppdt_olq_result.is_some());
    assert_eq!(processed.dashboard.completed_tests_count(), 1);
    assert_eq!(processed.top_olqs, vec![(Olq::PowerOfExpression, 4.0)]);
}

#[test]
fn test_second_load_is_cache_hit() {
    let service = DashboardService::default_config(populated_source());

    let first = service.load("cadet-1", false).unwrap();
    let second = service.load("cadet-1", false).unwrap();

    assert_eq!(service.source().fetches.get(), 1);
    assert!(second.cache_metadata.is_cached);
    assert!(!second.cache_metadata.is_stale);
    assert_eq!(first.average_olq_scores, second.average_olq_scores);

    let metrics = service.metrics();
    assert_eq!(metrics.cache_hits, 1);
    assert_eq!(metrics.cache_misses, 1);
}

#[test]
fn test_force_refresh_bypasses_cache() {
    let service = DashboardService::default_config(populated_source());

    service.load("cadet-1", false).unwrap();
    let refreshed = service.load("cadet-1", true).unwrap();

    assert_eq!(service.source().fetches.get(), 2);
    assert!(refreshed.cache_metadata.forced_refresh);
    assert!(!refreshed.cache_metadata.is_cached);
}

#[test]
fn test_invalidate_forces_refetch() {
    let service = DashboardService::default_config(populated_source());

    service.load("cadet-1", false).unwrap();
    service.invalidate("cadet-1");
    assert_eq!(service.cached_users(), 0);

    let reloaded = service.load("cadet-1", false).unwrap();
    assert_eq!(service.source().fetches.get(), 2);
    assert!(!reloaded.cache_metadata.is_cached);
    assert_eq!(service.metrics().invalidations, 1);
}

#[test]
fn test_cache_is_per_user() {
    let service = DashboardService::default_config(populated_source());

    service.load("cadet-1", false).unwrap();
    service.load("cadet-2", false).unwrap();
    assert_eq!(service.cached_users(), 2);

    service.invalidate_all();
    assert_eq!(service.cached_users(), 0);
}

#[test]
fn test_failed_refresh_serves_stale_snapshot() {
    let config = DashboardConfig {
        cache_ttl_secs: 0,
        ..DashboardConfig::default()
    };
    let service = DashboardService::new(populated_source(), config).unwrap();

    let fresh = service.load("cadet-1", false).unwrap();
    service.source().failing.set(true);
    let stale = service.load("cadet-1", false).unwrap();

    assert!(stale.cache_metadata.is_cached);
    assert!(stale.cache_metadata.is_stale);
    assert_eq!(stale.average_olq_scores, fresh.average_olq_scores);

    let metrics = service.metrics();
    assert_eq!(metrics.fetch_failures, 1);
    assert_eq!(metrics.stale_serves, 1);
}

#[test]
fn test_failed_forced_refresh_within_ttl_is_not_stale() {
    let service = DashboardService::default_config(populated_source());

    service.load("cadet-1", false).unwrap();
    service.source().failing.set(true);
    let served = service.load("cadet-1", true).unwrap();

    assert!(served.cache_metadata.is_cached);
    assert!(!served.cache_metadata.is_stale);
    assert!(served.cache_metadata.forced_refresh);
    assert_eq!(service.metrics().fetch_failures, 1);
}

#[test]
fn test_empty_gto_result_not_counted_as_completed() {
    let empty_gto: OlqAnalysisResult = serde_json::from_value(serde_json::json!({
        "submission_id": "gto-ct-empty",
        "test_type": "GTO_CT",
        "olq_scores": {},
        "ai_confidence": 0
    }))
    .unwrap();

    let mut source = MockSource::default();
    source.psych.insert(
        PsychTest::Tat,
        analysis(TestType::Tat, &[(Olq::Courage, 5)]),
    );
    source.gto.insert(GtoTestType::CommandTask, empty_gto);

    let service = DashboardService::default_config(source);
    let processed = service.load("cadet-2", false).unwrap();

    assert_eq!(processed.dashboard.completed_tests_count(), 1);
    assert!(processed.dashboard.phase2_results.gto_results.is_empty());
    assert_eq!(service.metrics().empty_results, 1);
}

#[test]
fn test_failure_without_snapshot_is_error() {
    let service = DashboardService::default_config(populated_source());
    service.source().failing.set(true);

    let err = service.load("cadet-1", false).unwrap_err();
    assert!(matches!(err, DashboardError::Source(_)));
    assert!(err.to_string().contains("network unavailable"));
}

#[test]
fn test_no_cache_config_does_not_mask_failures() {
    let service = DashboardService::new(populated_source(), DashboardConfig::no_cache()).unwrap();

    service.load("cadet-1", false).unwrap();
    service.load("cadet-1", false).unwrap();
    assert_eq!(service.source().fetches.get(), 2);

    service.source().failing.set(true);
    assert!(service.load("cadet-1", false).is_err());
}

#[test]
fn test_empty_dashboard_is_not_an_error() {
    let service = DashboardService::default_config(MockSource::default());
    let processed = service.load("new-cadet", false).unwrap();

    assert!(processed.average_olq_scores.is_empty());
    assert!(processed.top_olqs.is_empty());
    assert!(processed.improvement_olqs.is_empty());
    assert_eq!(processed.overall_average_score, None);
    assert_eq!(processed.dashboard.progress_percentage(), 0.0);
}

#[test]
fn test_empty_score_results_contribute_nothing() {
    let empty: OlqAnalysisResult = serde_json::from_value(serde_json::json!({
        "submission_id": "srt-empty",
        "test_type": "SRT",
        "olq_scores": {},
        "ai_confidence": 0
    }))
    .unwrap();

    let mut source = populated_source();
    source.psych.insert(PsychTest::Srt, empty);

    let service = DashboardService::default_config(source);
    let processed = service.load("cadet-1", false).unwrap();

    assert_eq!(processed.average_olq_scores.len(), 3);
    assert_eq!(processed.average_olq_scores[&Olq::EffectiveIntelligence], 4.0);
    assert_eq!(service.metrics().empty_results, 1);
}

#[test]
fn test_store_tracks_service_loads() {
    let service = DashboardService::default_config(populated_source());
    let store = DashboardStore::new();
    let receiver = store.subscribe();

    let state = store.load(&service, "cadet-1", false).unwrap();
    assert!(state.data().is_some());
    assert!(receiver.borrow().data().is_some());

    let state = store.invalidate(&service, "cadet-1");
    assert_eq!(state, DashboardState::Idle);
    assert_eq!(service.cached_users(), 0);

    service.source().failing.set(true);
    assert!(store.load(&service, "cadet-1", false).is_err());
    assert!(matches!(store.state(), DashboardState::Failed { .. }));
}
