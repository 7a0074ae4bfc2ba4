//! Trait definitions for external interactions
//!
//! These traits define the boundary between the scoring core and the data
//! collaborators that fetch submissions and results.

use crate::{
    GtoTestType, OirTestResult, OlqAnalysisResult, PpdtSubmission, PsychTest, SubmissionId,
};

/// Read access to a candidate's latest test results
///
/// Implemented by whatever holds the results (a remote document store in
/// production, a JSON snapshot in the CLI, an in-memory map in tests).
/// `Ok(None)` means "not taken yet" and is never an error.
pub trait ResultSource {
    /// Error type for fetch operations
    type Error;

    /// Latest OIR result
    fn latest_oir_result(&self, user_id: &str) -> Result<Option<OirTestResult>, Self::Error>;

    /// Latest PPDT submission
    fn latest_ppdt_submission(&self, user_id: &str)
        -> Result<Option<PpdtSubmission>, Self::Error>;

    /// OLQ analysis stored for one of the user's PPDT submissions
    fn ppdt_result(
        &self,
        user_id: &str,
        submission_id: &SubmissionId,
    ) -> Result<Option<OlqAnalysisResult>, Self::Error>;

    /// Latest completed analysis for a psychology test
    fn latest_psych_result(
        &self,
        user_id: &str,
        test: PsychTest,
    ) -> Result<Option<OlqAnalysisResult>, Self::Error>;

    /// Latest result for a GTO task
    fn latest_gto_result(
        &self,
        user_id: &str,
        test: GtoTestType,
    ) -> Result<Option<OlqAnalysisResult>, Self::Error>;

    /// Latest interview result
    fn latest_interview_result(
        &self,
        user_id: &str,
    ) -> Result<Option<OlqAnalysisResult>, Self::Error>;
}
