//! Analysis results: the scoring output for one test submission

use crate::error::ValidationError;
use crate::olq::Olq;
use crate::score::{OlqScore, ScoreRating};
use crate::scoring::PRACTICAL_MIN_SCORE;
use crate::test_type::TestType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a test submission
///
/// Collaborators hand us whatever document ID their store uses; locally
/// generated IDs are UUIDv7 so they sort chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Generate a new UUIDv7-based identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use ssbmax_domain::SubmissionId;
    ///
    /// let id = SubmissionId::generate();
    /// assert_eq!(id.as_str().len(), 36);
    /// ```
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an existing identifier
    ///
    /// # Errors
    /// Returns [`ValidationError::BlankSubmissionId`] for blank input
    pub fn from_string(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::BlankSubmissionId);
        }
        Ok(Self(value))
    }

    /// Identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubmissionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(value)
    }
}

impl From<SubmissionId> for String {
    fn from(id: SubmissionId) -> Self {
        id.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a submission's analysis
///
/// `PendingAnalysis -> Analyzing -> Completed | Failed`, and a failed
/// analysis may be queued again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStatus {
    /// Submitted, not yet picked up
    PendingAnalysis,
    /// Grading in progress
    Analyzing,
    /// Scores available
    Completed,
    /// Grading failed
    Failed,
}

impl AnalysisStatus {
    /// Whether moving to `next` is a legal transition
    pub fn can_transition_to(&self, next: AnalysisStatus) -> bool {
        use AnalysisStatus::*;
        matches!(
            (self, next),
            (PendingAnalysis, Analyzing)
                | (Analyzing, Completed)
                | (Analyzing, Failed)
                | (Failed, PendingAnalysis)
        )
    }

    /// Move to `next`
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidStatusTransition`] for illegal moves
    pub fn transition(self, next: AnalysisStatus) -> Result<AnalysisStatus, ValidationError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ValidationError::InvalidStatusTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Whether no further grading will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Completed)
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisStatus::PendingAnalysis => "PENDING_ANALYSIS",
            AnalysisStatus::Analyzing => "ANALYZING",
            AnalysisStatus::Completed => "COMPLETED",
            AnalysisStatus::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Completed scoring output for one submission
///
/// `overall_score`, `overall_rating`, `strengths` and `weaknesses` are always
/// derived from `olq_scores`, so they can never disagree with them.
///
/// Results built through [`OlqAnalysisResult::new`] always carry at least one
/// score. Results deserialized from a collaborator may arrive with an empty
/// score map; those are kept so the dashboard can treat them as contributing
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnalysisResult")]
pub struct OlqAnalysisResult {
    submission_id: SubmissionId,
    test_type: TestType,
    olq_scores: BTreeMap<Olq, OlqScore>,
    overall_score: f64,
    overall_rating: String,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    recommendations: Vec<String>,
    analyzed_at: u64,
    ai_confidence: u8,
}

#[derive(Deserialize)]
struct RawAnalysisResult {
    submission_id: SubmissionId,
    test_type: TestType,
    #[serde(default)]
    olq_scores: BTreeMap<Olq, OlqScore>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    analyzed_at: u64,
    ai_confidence: i64,
}

impl TryFrom<RawAnalysisResult> for OlqAnalysisResult {
    type Error = ValidationError;

    fn try_from(raw: RawAnalysisResult) -> Result<Self, Self::Error> {
        let ai_confidence = checked_confidence(raw.ai_confidence)?;
        Ok(Self::assemble(
            raw.submission_id,
            raw.test_type,
            raw.olq_scores,
            raw.recommendations,
            raw.analyzed_at,
            ai_confidence,
        ))
    }
}

fn checked_confidence(confidence: i64) -> Result<u8, ValidationError> {
    u8::try_from(confidence)
        .ok()
        .filter(|c| *c <= 100)
        .ok_or(ValidationError::ConfidenceOutOfRange { confidence })
}

impl OlqAnalysisResult {
    /// Build a completed analysis result
    ///
    /// # Errors
    /// Returns [`ValidationError`] when `olq_scores` is empty or
    /// `ai_confidence` exceeds 100.
    ///
    /// # Examples
    ///
    /// ```
    /// use ssbmax_domain::{Olq, OlqAnalysisResult, OlqScore, SubmissionId, TestType};
    /// use std::collections::BTreeMap;
    ///
    /// let mut scores = BTreeMap::new();
    /// scores.insert(Olq::EffectiveIntelligence, OlqScore::new(5, 80, "Sharp").unwrap());
    /// scores.insert(Olq::Courage, OlqScore::new(7, 80, "Hesitant").unwrap());
    ///
    /// let result = OlqAnalysisResult::new(
    ///     SubmissionId::from_string("tat-1").unwrap(),
    ///     TestType::Tat,
    ///     scores,
    ///     1_700_000_000_000,
    ///     85,
    /// ).unwrap();
    /// assert_eq!(result.overall_score(), 6.0);
    /// ```
    pub fn new(
        submission_id: SubmissionId,
        test_type: TestType,
        olq_scores: BTreeMap<Olq, OlqScore>,
        analyzed_at: u64,
        ai_confidence: u8,
    ) -> Result<Self, ValidationError> {
        if olq_scores.is_empty() {
            return Err(ValidationError::EmptyScores);
        }
        let ai_confidence = checked_confidence(i64::from(ai_confidence))?;

        Ok(Self::assemble(
            submission_id,
            test_type,
            olq_scores,
            Vec::new(),
            analyzed_at,
            ai_confidence,
        ))
    }

    /// Attach grader recommendations
    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    fn assemble(
        submission_id: SubmissionId,
        test_type: TestType,
        olq_scores: BTreeMap<Olq, OlqScore>,
        recommendations: Vec<String>,
        analyzed_at: u64,
        ai_confidence: u8,
    ) -> Self {
        let overall_score = if olq_scores.is_empty() {
            0.0
        } else {
            let total: f64 = olq_scores.values().map(|s| f64::from(s.score())).sum();
            total / olq_scores.len() as f64
        };
        let overall_rating = if olq_scores.is_empty() {
            "Unrated".to_string()
        } else {
            ScoreRating::from_average(overall_score).label().to_string()
        };

        let mut ranked: Vec<(&Olq, &OlqScore)> = olq_scores.iter().collect();
        // stable: equal scores keep declaration order
        ranked.sort_by_key(|(_, s)| s.score());
        let strengths = ranked
            .iter()
            .filter(|(_, s)| s.score() <= PRACTICAL_MIN_SCORE)
            .map(|(olq, _)| olq.display_name().to_string())
            .collect();
        ranked.sort_by_key(|(_, s)| std::cmp::Reverse(s.score()));
        let weaknesses = ranked
            .iter()
            .filter(|(_, s)| s.is_limitation())
            .map(|(olq, _)| olq.display_name().to_string())
            .collect();

        Self {
            submission_id,
            test_type,
            olq_scores,
            overall_score,
            overall_rating,
            strengths,
            weaknesses,
            recommendations,
            analyzed_at,
            ai_confidence,
        }
    }

    /// Submission this result belongs to
    pub fn submission_id(&self) -> &SubmissionId {
        &self.submission_id
    }

    /// Test that was scored
    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    /// Per-quality scores
    pub fn olq_scores(&self) -> &BTreeMap<Olq, OlqScore> {
        &self.olq_scores
    }

    /// Score for one quality, if it was assessed
    pub fn score_for(&self, olq: Olq) -> Option<&OlqScore> {
        self.olq_scores.get(&olq)
    }

    /// Mean of the per-quality scores (0.0 when none were recorded)
    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    /// Rating label for the rounded overall score
    pub fn overall_rating(&self) -> &str {
        &self.overall_rating
    }

    /// Qualities scoring 5 or better, best first
    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    /// Qualities at limitation, worst first
    pub fn weaknesses(&self) -> &[String] {
        &self.weaknesses
    }

    /// Grader recommendations
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    /// Analysis timestamp (milliseconds since Unix epoch)
    pub fn analyzed_at(&self) -> u64 {
        self.analyzed_at
    }

    /// Grader confidence in the whole analysis (0-100)
    pub fn ai_confidence(&self) -> u8 {
        self.ai_confidence
    }

    /// Whether the result carries no scores
    pub fn is_empty(&self) -> bool {
        self.olq_scores.is_empty()
    }

    /// Plain `OLQ -> score` view, used by the validator
    pub fn score_map(&self) -> BTreeMap<Olq, u8> {
        self.olq_scores
            .iter()
            .map(|(olq, s)| (*olq, s.score()))
            .collect()
    }
}
