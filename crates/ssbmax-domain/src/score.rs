//! A single OLQ score (SSB convention: lower is better)

use crate::error::ValidationError;
use crate::scoring::{MAX_SCORE, MIN_SCORE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score for one quality in one submission
///
/// SSB uses a 1-10 scale where LOWER numbers indicate BETTER performance.
/// Typical distribution: 1-4 rare, 5-6 common, 7 average, 8+ limitation.
///
/// Immutable once built; deserialization goes through [`OlqScore::new`].
///
/// # Examples
///
/// ```
/// use ssbmax_domain::{OlqScore, ScoreRating};
///
/// let score = OlqScore::new(5, 90, "Clear, structured story").unwrap();
/// assert_eq!(score.rating(), ScoreRating::VeryGood);
///
/// assert!(OlqScore::new(0, 50, "Invalid").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOlqScore")]
pub struct OlqScore {
    score: u8,
    confidence: u8,
    reasoning: String,
}

#[derive(Deserialize)]
struct RawOlqScore {
    score: i64,
    confidence: i64,
    reasoning: String,
}

impl TryFrom<RawOlqScore> for OlqScore {
    type Error = ValidationError;

    fn try_from(raw: RawOlqScore) -> Result<Self, Self::Error> {
        Self::checked(raw.score, raw.confidence, raw.reasoning)
    }
}

impl OlqScore {
    /// Create a validated score
    ///
    /// # Errors
    /// Returns [`ValidationError`] when the score is outside 1-10, the
    /// confidence is above 100, or the reasoning is blank.
    pub fn new(
        score: u8,
        confidence: u8,
        reasoning: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::checked(i64::from(score), i64::from(confidence), reasoning.into())
    }

    fn checked(score: i64, confidence: i64, reasoning: String) -> Result<Self, ValidationError> {
        if score < i64::from(MIN_SCORE) || score > i64::from(MAX_SCORE) {
            return Err(ValidationError::ScoreOutOfRange { score });
        }
        if !(0..=100).contains(&confidence) {
            return Err(ValidationError::ConfidenceOutOfRange { confidence });
        }
        if reasoning.trim().is_empty() {
            return Err(ValidationError::BlankReasoning);
        }

        Ok(Self {
            score: score as u8,
            confidence: confidence as u8,
            reasoning,
        })
    }

    /// Score (1-10)
    pub fn score(&self) -> u8 {
        self.score
    }

    /// Grader confidence in percent (0-100)
    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    /// Grader's explanation
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Rating band for this score
    pub fn rating(&self) -> ScoreRating {
        ScoreRating::from_score(self.score)
    }

    /// Whether this score is a limitation
    pub fn is_limitation(&self) -> bool {
        crate::scoring::is_limitation(self.score)
    }
}

/// Rating band on the SSB scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreRating {
    /// 1-3: rare, outstanding performance
    Exceptional,
    /// 4: top tier
    Excellent,
    /// 5: best common score
    VeryGood,
    /// 6: above average
    Good,
    /// 7: typical performance
    Average,
    /// 8: lowest acceptable
    BelowAverage,
    /// 9-10: usually rejected
    Poor,
}

impl ScoreRating {
    /// Band for an integer score; anything outside 1-10 clamps to the nearest band
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => ScoreRating::Exceptional,
            4 => ScoreRating::Excellent,
            5 => ScoreRating::VeryGood,
            6 => ScoreRating::Good,
            7 => ScoreRating::Average,
            8 => ScoreRating::BelowAverage,
            _ => ScoreRating::Poor,
        }
    }

    /// Band for a fractional (averaged) score, rounded half-up
    pub fn from_average(score: f64) -> Self {
        let rounded = score.round().clamp(0.0, f64::from(u8::MAX));
        Self::from_score(rounded as u8)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ScoreRating::Exceptional => "Exceptional",
            ScoreRating::Excellent => "Excellent",
            ScoreRating::VeryGood => "Very Good",
            ScoreRating::Good => "Good",
            ScoreRating::Average => "Average",
            ScoreRating::BelowAverage => "Below Average",
            ScoreRating::Poor => "Poor",
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
