//! SSBMax Domain Layer
//!
//! This crate contains the core scoring model for Officer-Like-Qualities (OLQ)
//! assessment. It defines the value objects, scoring rules and the repository
//! trait that every other crate in the workspace depends upon.
//!
//! ## Key Concepts
//!
//! - **OLQ**: One of 15 fixed qualities, grouped into 4 SSB factors
//! - **Score**: 1-10 scale where LOWER is better (1 = exceptional, 10 = poor)
//! - **Limitation**: Any score at or above 8
//! - **Analysis Result**: Every OLQ score produced for one test submission
//! - **Dashboard Data**: The per-user bag of (possibly absent) test results
//!
//! ## Architecture
//!
//! - Pure business logic only, no I/O
//! - Invariants are enforced at construction (see [`ValidationError`])
//! - Data collaborators plug in through [`traits::ResultSource`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod dashboard;
pub mod error;
pub mod olq;
pub mod score;
pub mod scoring;
pub mod test_type;
pub mod traits;

// Re-exports for convenience
pub use analysis::{AnalysisStatus, OlqAnalysisResult, SubmissionId};
pub use dashboard::{
    OirTestResult, OlqDashboardData, Phase1Results, Phase2Results, PpdtSubmission, TestGrade,
};
pub use error::ValidationError;
pub use olq::{Olq, OlqCategory};
pub use score::{OlqScore, ScoreRating};
pub use scoring::EntryType;
pub use test_type::{GtoTestType, PsychTest, TestType};
