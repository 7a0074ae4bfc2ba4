//! Per-user dashboard data: every test result a candidate has so far
//!
//! Absence is a first-class state here: a `None` result means "not yet
//! completed", never an error.

use crate::analysis::{AnalysisStatus, OlqAnalysisResult, SubmissionId};
use crate::test_type::{GtoTestType, PsychTest, TestType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Phase 1 OIR pass mark (percent)
pub const OIR_PASS_PERCENTAGE: f64 = 50.0;

/// Grade band for an OIR result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestGrade {
    /// 90% and above
    Excellent,
    /// 75% and above
    VeryGood,
    /// 60% and above
    Good,
    /// 50% and above
    Average,
    /// Below the pass mark
    NeedsImprovement,
}

/// Officer Intelligence Rating result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OirTestResult {
    /// Test identifier
    pub test_id: String,
    /// Session (submission document) identifier
    pub session_id: String,
    /// Number of questions
    pub total_questions: u32,
    /// Correctly answered questions
    pub correct_answers: u32,
    /// Percentage score (0-100)
    pub percentage_score: f64,
    /// Completion timestamp (ms since Unix epoch)
    #[serde(default)]
    pub completed_at: u64,
}

impl OirTestResult {
    /// Whether the candidate reached the pass mark
    pub fn passed(&self) -> bool {
        self.percentage_score >= OIR_PASS_PERCENTAGE
    }

    /// Grade band
    pub fn grade(&self) -> TestGrade {
        match self.percentage_score {
            p if p >= 90.0 => TestGrade::Excellent,
            p if p >= 75.0 => TestGrade::VeryGood,
            p if p >= 60.0 => TestGrade::Good,
            p if p >= OIR_PASS_PERCENTAGE => TestGrade::Average,
            _ => TestGrade::NeedsImprovement,
        }
    }
}

/// PPDT submission record (the story itself lives with the collaborator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpdtSubmission {
    /// Submission identifier
    pub submission_id: SubmissionId,
    /// Analysis lifecycle state as last recorded on the submission
    pub status: AnalysisStatus,
    /// Submission timestamp (ms since Unix epoch)
    #[serde(default)]
    pub submitted_at: u64,
}

/// Phase 1 (screening) results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase1Results {
    /// OIR result
    #[serde(default)]
    pub oir_result: Option<OirTestResult>,
    /// PPDT submission
    #[serde(default)]
    pub ppdt_submission: Option<PpdtSubmission>,
    /// OLQ analysis of the PPDT submission
    #[serde(default)]
    pub ppdt_olq_result: Option<OlqAnalysisResult>,
}

impl Phase1Results {
    /// PPDT analysis whose test type is not PPDT
    pub fn misfiled(&self) -> Vec<(TestType, &OlqAnalysisResult)> {
        self.ppdt_olq_result
            .iter()
            .filter(|r| r.test_type() != TestType::Ppdt)
            .map(|r| (TestType::Ppdt, r))
            .collect()
    }
}

/// Phase 2 (psychology, GTO, interview) results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase2Results {
    /// Thematic Apperception Test
    #[serde(default)]
    pub tat_result: Option<OlqAnalysisResult>,
    /// Word Association Test
    #[serde(default)]
    pub wat_result: Option<OlqAnalysisResult>,
    /// Situation Reaction Test
    #[serde(default)]
    pub srt_result: Option<OlqAnalysisResult>,
    /// Self Description
    #[serde(default)]
    pub sd_result: Option<OlqAnalysisResult>,
    /// Latest result per GTO task
    #[serde(default)]
    pub gto_results: BTreeMap<GtoTestType, OlqAnalysisResult>,
    /// Personal interview
    #[serde(default)]
    pub interview_result: Option<OlqAnalysisResult>,
}

impl Phase2Results {
    /// Psychology result slot for a test
    pub fn psych(&self, test: PsychTest) -> Option<&OlqAnalysisResult> {
        match test {
            PsychTest::Tat => self.tat_result.as_ref(),
            PsychTest::Wat => self.wat_result.as_ref(),
            PsychTest::Srt => self.srt_result.as_ref(),
            PsychTest::Sd => self.sd_result.as_ref(),
        }
    }

    /// Results whose test type differs from the slot holding them
    ///
    /// Each entry pairs the slot's expected type with the misfiled result.
    pub fn misfiled(&self) -> Vec<(TestType, &OlqAnalysisResult)> {
        let psych = PsychTest::ALL
            .iter()
            .filter_map(|t| self.psych(*t).map(|r| (t.test_type(), r)));
        let gto = self.gto_results.iter().map(|(g, r)| (g.test_type(), r));
        let interview = self
            .interview_result
            .iter()
            .map(|r| (TestType::Interview, r));

        psych
            .chain(gto)
            .chain(interview)
            .filter(|(expected, r)| r.test_type() != *expected)
            .collect()
    }

    /// Mutable psychology result slot for a test
    pub fn psych_mut(&mut self, test: PsychTest) -> &mut Option<OlqAnalysisResult> {
        match test {
            PsychTest::Tat => &mut self.tat_result,
            PsychTest::Wat => &mut self.wat_result,
            PsychTest::Srt => &mut self.srt_result,
            PsychTest::Sd => &mut self.sd_result,
        }
    }
}

/// Everything the dashboard knows about one candidate
///
/// Recomputed on demand; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OlqDashboardData {
    /// Candidate identifier
    pub user_id: String,
    /// Phase 1 results
    #[serde(default)]
    pub phase1_results: Phase1Results,
    /// Phase 2 results
    #[serde(default)]
    pub phase2_results: Phase2Results,
}

impl OlqDashboardData {
    /// 2 Phase-1 + 4 psychology + 8 GTO + 1 interview
    pub const TOTAL_TESTS: usize = 15;

    /// Dashboard with no completed tests
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            phase1_results: Phase1Results::default(),
            phase2_results: Phase2Results::default(),
        }
    }

    /// Fixed number of tests in the full SSB sequence
    pub fn total_tests(&self) -> usize {
        Self::TOTAL_TESTS
    }

    /// Number of completed tests (each GTO task counts separately)
    ///
    /// PPDT counts once whether the submission, its analysis, or both are present.
    pub fn completed_tests_count(&self) -> usize {
        let p1 = &self.phase1_results;
        let p2 = &self.phase2_results;

        let phase1 = usize::from(p1.oir_result.is_some())
            + usize::from(p1.ppdt_submission.is_some() || p1.ppdt_olq_result.is_some());
        let psych = PsychTest::ALL
            .iter()
            .filter(|t| p2.psych(**t).is_some())
            .count();
        let interview = usize::from(p2.interview_result.is_some());

        (phase1 + psych + p2.gto_results.len() + interview).min(Self::TOTAL_TESTS)
    }

    /// Completion percentage (0-100)
    pub fn progress_percentage(&self) -> f64 {
        self.completed_tests_count() as f64 / Self::TOTAL_TESTS as f64 * 100.0
    }

    /// Results filed under the wrong test, paired with the expected type
    pub fn misfiled_results(&self) -> Vec<(TestType, &OlqAnalysisResult)> {
        let mut misfiled = self.phase1_results.misfiled();
        misfiled.extend(self.phase2_results.misfiled());
        misfiled
    }

    /// Every present OLQ analysis result, in a fixed order:
    /// PPDT, TAT, WAT, SRT, SD, GTO tasks, interview
    pub fn analysis_results(&self) -> Vec<&OlqAnalysisResult> {
        let p2 = &self.phase2_results;
        let mut results: Vec<&OlqAnalysisResult> = Vec::new();

        results.extend(self.phase1_results.ppdt_olq_result.as_ref());
        results.extend(PsychTest::ALL.iter().filter_map(|t| p2.psych(*t)));
        results.extend(p2.gto_results.values());
        results.extend(p2.interview_result.as_ref());

        results
    }
}
