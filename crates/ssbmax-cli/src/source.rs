//! Result source backed by a JSON snapshot file.
//!
//! The snapshot maps user IDs to their phase 1 and phase 2 results:
//!
//! ```json
//! {
//!   "users": {
//!     "cadet-1": {
//!       "phase1_results": { "oir_result": { ... } },
//!       "phase2_results": { "tat_result": { ... }, "gto_results": { "GROUP_DISCUSSION": { ... } } }
//!     }
//!   }
//! }
//! ```
//!
//! Users and results missing from the snapshot read as "not taken yet".
//! A result filed under another test's slot is rejected at load time.

use crate::error::{CliError, Result};
use serde::Deserialize;
use ssbmax_domain::traits::ResultSource;
use ssbmax_domain::{
    GtoTestType, OirTestResult, OlqAnalysisResult, Phase1Results, Phase2Results, PpdtSubmission,
    PsychTest, SubmissionId,
};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct UserResults {
    #[serde(default)]
    phase1_results: Phase1Results,
    #[serde(default)]
    phase2_results: Phase2Results,
}

/// In-memory results loaded from a snapshot
#[derive(Debug, Default, Deserialize)]
pub struct SnapshotSource {
    #[serde(default)]
    users: BTreeMap<String, UserResults>,
}

impl SnapshotSource {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let source: Self = serde_json::from_str(json)?;
        source.check_slots()?;
        Ok(source)
    }

    /// Load a snapshot file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let source = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), users = source.users.len(), "Loaded snapshot");
        Ok(source)
    }

    /// User IDs present in the snapshot.
    pub fn user_ids(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    fn check_slots(&self) -> Result<()> {
        for (user_id, results) in &self.users {
            let misfiled = results
                .phase1_results
                .misfiled()
                .into_iter()
                .chain(results.phase2_results.misfiled());
            if let Some((expected, result)) = misfiled.into_iter().next() {
                return Err(CliError::InvalidInput(format!(
                    "{}: result {} is a {} result filed under {}",
                    user_id,
                    result.submission_id(),
                    result.test_type().label(),
                    expected.label()
                )));
            }
        }
        Ok(())
    }

    fn user(&self, user_id: &str) -> Option<&UserResults> {
        self.users.get(user_id)
    }
}

impl ResultSource for SnapshotSource {
    type Error = Infallible;

    fn latest_oir_result(&self, user_id: &str) -> std::result::Result<Option<OirTestResult>, Infallible> {
        Ok(self
            .user(user_id)
            .and_then(|u| u.phase1_results.oir_result.clone()))
    }

    fn latest_ppdt_submission(
        &self,
        user_id: &str,
    ) -> std::result::Result<Option<PpdtSubmission>, Infallible> {
        Ok(self
            .user(user_id)
            .and_then(|u| u.phase1_results.ppdt_submission.clone()))
    }

    fn ppdt_result(
        &self,
        user_id: &str,
        submission_id: &SubmissionId,
    ) -> std::result::Result<Option<OlqAnalysisResult>, Infallible> {
        let result = self.user(user_id).and_then(|u| {
            let p1 = &u.phase1_results;
            let matches = p1
                .ppdt_submission
                .as_ref()
                .is_some_and(|s| &s.submission_id == submission_id);
            if matches {
                p1.ppdt_olq_result.clone()
            } else {
                None
            }
        });
        Ok(result)
    }

    fn latest_psych_result(
        &self,
        user_id: &str,
        test: PsychTest,
    ) -> std::result::Result<Option<OlqAnalysisResult>, Infallible> {
        Ok(self
            .user(user_id)
            .and_then(|u| u.phase2_results.psych(test).cloned()))
    }

    fn latest_gto_result(
        &self,
        user_id: &str,
        test: GtoTestType,
    ) -> std::result::Result<Option<OlqAnalysisResult>, Infallible> {
        Ok(self
            .user(user_id)
            .and_then(|u| u.phase2_results.gto_results.get(&test).cloned()))
    }

    fn latest_interview_result(
        &self,
        user_id: &str,
    ) -> std::result::Result<Option<OlqAnalysisResult>, Infallible> {
        Ok(self
            .user(user_id)
            .and_then(|u| u.phase2_results.interview_result.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "users": {
            "cadet-1": {
                "phase1_results": {
                    "oir_result": {
                        "test_id": "oir-1",
                        "session_id": "s-1",
                        "total_questions": 50,
                        "correct_answers": 35,
                        "percentage_score": 70.0
                    },
                    "ppdt_submission": { "submission_id": "ppdt-1", "status": "COMPLETED" },
                    "ppdt_olq_result": {
                        "submission_id": "ppdt-1",
                        "test_type": "PPDT",
                        "olq_scores": {
                            "POWER_OF_EXPRESSION": { "score": 4, "confidence": 80, "reasoning": "Clear narration" }
                        },
                        "ai_confidence": 85
                    }
                },
                "phase2_results": {
                    "gto_results": {
                        "LECTURETTE": {
                            "submission_id": "gto-1",
                            "test_type": "GTO_LECTURETTE",
                            "olq_scores": {
                                "SELF_CONFIDENCE": { "score": 6, "confidence": 70, "reasoning": "Nervous start" }
                            },
                            "ai_confidence": 75
                        }
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_reads_user_results() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        assert_eq!(source.user_ids().collect::<Vec<_>>(), vec!["cadet-1"]);

        let oir = source.latest_oir_result("cadet-1").unwrap().unwrap();
        assert_eq!(oir.correct_answers, 35);

        let submission = source.latest_ppdt_submission("cadet-1").unwrap().unwrap();
        let ppdt = source
            .ppdt_result("cadet-1", &submission.submission_id)
            .unwrap();
        assert!(ppdt.is_some());

        let gto = source
            .latest_gto_result("cadet-1", GtoTestType::Lecturette)
            .unwrap();
        assert!(gto.is_some());
        assert!(source
            .latest_gto_result("cadet-1", GtoTestType::CommandTask)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_unknown_user_has_no_results() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        assert!(source.latest_oir_result("nobody").unwrap().is_none());
        assert!(source
            .latest_psych_result("nobody", PsychTest::Tat)
            .unwrap()
            .is_none());
        assert!(source.latest_interview_result("nobody").unwrap().is_none());
    }

    #[test]
    fn test_invalid_score_rejected() {
        let bad = SNAPSHOT.replace("\"score\": 4", "\"score\": 11");
        assert!(SnapshotSource::from_json(&bad).is_err());
    }

    #[test]
    fn test_ppdt_result_scoped_to_user() {
        let shared = SNAPSHOT.replace(
            r#""phase2_results": {"#,
            r#""phase2_results": {} },
            "cadet-2": {
                "phase1_results": {
                    "ppdt_submission": { "submission_id": "ppdt-1", "status": "PENDING_ANALYSIS" }
                },
                "phase2_results": {"#,
        );
        let source = SnapshotSource::from_json(&shared).unwrap();
        let id = SubmissionId::from_string("ppdt-1").unwrap();

        assert!(source.ppdt_result("cadet-1", &id).unwrap().is_some());
        assert!(source.ppdt_result("cadet-2", &id).unwrap().is_none());
        assert!(source.ppdt_result("nobody", &id).unwrap().is_none());
    }

    #[test]
    fn test_misfiled_result_rejected() {
        let misfiled = SNAPSHOT.replace(r#""test_type": "GTO_LECTURETTE""#, r#""test_type": "GTO_CT""#);
        let err = SnapshotSource::from_json(&misfiled).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert!(err.to_string().contains("gto-1"));
    }

    #[test]
    fn test_empty_snapshot() {
        let source = SnapshotSource::from_json("{}").unwrap();
        assert_eq!(source.user_ids().count(), 0);
    }
}
