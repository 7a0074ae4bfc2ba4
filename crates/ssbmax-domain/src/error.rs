//! Validation errors raised when constructing domain values

use thiserror::Error;

/// A domain invariant was violated while constructing a value
///
/// Construction fails as a whole; no partially-valid object is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// OLQ score outside the 1-10 scale
    #[error("OLQ score must be between 1 and 10 (got {score})")]
    ScoreOutOfRange {
        /// Offending score
        score: i64,
    },

    /// Confidence outside 0-100
    #[error("Confidence must be between 0 and 100 (got {confidence})")]
    ConfidenceOutOfRange {
        /// Offending confidence
        confidence: i64,
    },

    /// Reasoning text missing for a scored quality
    #[error("Reasoning must not be blank for a scored OLQ")]
    BlankReasoning,

    /// Analysis produced no OLQ scores
    #[error("Analysis result must contain at least one OLQ score")]
    EmptyScores,

    /// Submission identifier missing
    #[error("Submission ID must not be blank")]
    BlankSubmissionId,

    /// Illegal analysis status change
    #[error("Invalid analysis status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },
}
