//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use serde::Deserialize;
use ssbmax_domain::{EntryType, Olq, OlqAnalysisResult, OlqScore, SubmissionId, TestType};
use ssbmax_validator::{ScoreValidator, ValidationConfig, ValidationReport};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Score sheet as written by a grader.
///
/// Score keys may be abbreviations (`"EI"`), display names or serialized
/// names (`"EFFECTIVE_INTELLIGENCE"`).
#[derive(Debug, Deserialize)]
pub struct ScoreSheet {
    /// Submission ID (generated when absent)
    #[serde(default)]
    pub submission_id: Option<String>,

    /// Test the scores came from
    pub test_type: TestType,

    /// Grader confidence in the whole analysis (0-100)
    #[serde(default = "default_ai_confidence")]
    pub ai_confidence: u8,

    /// Scores per quality
    pub scores: BTreeMap<String, OlqScore>,

    /// Grader recommendations
    #[serde(default)]
    pub recommendations: Vec<String>,
}

fn default_ai_confidence() -> u8 {
    100
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

impl ScoreSheet {
    /// Read a score sheet from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Build a validated analysis result.
    pub fn into_analysis(self) -> Result<OlqAnalysisResult> {
        let submission_id = match self.submission_id {
            Some(id) => SubmissionId::from_string(id)?,
            None => SubmissionId::generate(),
        };

        let mut scores = BTreeMap::new();
        for (key, score) in self.scores {
            let olq = Olq::parse(&key)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown OLQ '{}'", key)))?;
            if scores.insert(olq, score).is_some() {
                return Err(CliError::InvalidInput(format!(
                    "OLQ '{}' is scored more than once",
                    olq.display_name()
                )));
            }
        }

        let result = OlqAnalysisResult::new(
            submission_id,
            self.test_type,
            scores,
            now_millis(),
            self.ai_confidence,
        )?;
        Ok(result.with_recommendations(self.recommendations))
    }
}

/// Execute the validate command.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (result, report) = validate_file(&args, config)?;
    println!("{}", formatter.format_report(&result, &report)?);
    Ok(())
}

/// Validate the score sheet named by the arguments.
pub fn validate_file(
    args: &ValidateArgs,
    config: &Config,
) -> Result<(OlqAnalysisResult, ValidationReport)> {
    let result = ScoreSheet::from_file(&args.file)?.into_analysis()?;

    let validation_config = if args.strict {
        ValidationConfig::strict()
    } else if args.permissive {
        ValidationConfig::permissive()
    } else {
        ValidationConfig::default()
    };
    let entry_type: EntryType = args
        .entry
        .map(Into::into)
        .unwrap_or(config.settings.entry_type);

    let validator = ScoreValidator::new(validation_config)?;
    let report = validator.validate_result(&result, entry_type);
    tracing::debug!(
        submission_id = %result.submission_id(),
        %entry_type,
        recommendation = %report.recommendation_result.recommendation,
        "Score sheet validated"
    );

    Ok((result, report))
}
