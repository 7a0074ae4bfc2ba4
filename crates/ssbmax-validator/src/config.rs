//! Validator configuration

use crate::ValidatorError;
use serde::{Deserialize, Serialize};
use ssbmax_domain::scoring::{
    FACTOR_II_CAUTION_THRESHOLD, FACTOR_II_CRITICAL_THRESHOLD, LIMITATION_THRESHOLD, MAX_SCORE,
    MIN_SCORE,
};

/// Which rules run and at what thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Count limitations against the entry-type maximum
    pub check_limitations: bool,

    /// Enforce per-factor score consistency
    pub check_factor_consistency: bool,

    /// Look for critical qualities at limitation and the Factor II auto-reject
    pub check_critical_weaknesses: bool,

    /// Treat a Factor II average at the caution level as doubtful
    pub doubtful_on_factor_ii_caution: bool,

    /// Score at which a quality counts as a limitation (1-10)
    pub limitation_threshold: u8,

    /// Factor II average at or above this rejects outright
    pub factor_ii_critical_threshold: f64,

    /// Factor II average at or above this is cleared with caution
    pub factor_ii_caution_threshold: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_limitations: true,
            check_factor_consistency: true,
            check_critical_weaknesses: true,
            doubtful_on_factor_ii_caution: false,
            limitation_threshold: LIMITATION_THRESHOLD,
            factor_ii_critical_threshold: f64::from(FACTOR_II_CRITICAL_THRESHOLD),
            factor_ii_caution_threshold: f64::from(FACTOR_II_CAUTION_THRESHOLD),
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (consistency not enforced)
    ///
    /// Useful for single-test results, where graders rarely score every
    /// quality of a factor.
    pub fn permissive() -> Self {
        Self {
            check_factor_consistency: false,
            ..Self::default()
        }
    }

    /// Create a strict configuration (caution-level Factor II is doubtful)
    pub fn strict() -> Self {
        Self {
            doubtful_on_factor_ii_caution: true,
            ..Self::default()
        }
    }

    /// Check thresholds lie on the 1-10 scale and are ordered
    ///
    /// # Errors
    /// Returns [`ValidatorError::Config`] describing the first bad value
    pub fn check(&self) -> Result<(), ValidatorError> {
        let scale = f64::from(MIN_SCORE)..=f64::from(MAX_SCORE);

        if !(MIN_SCORE..=MAX_SCORE).contains(&self.limitation_threshold) {
            return Err(ValidatorError::Config(format!(
                "limitation_threshold {} is outside [{}, {}]",
                self.limitation_threshold, MIN_SCORE, MAX_SCORE
            )));
        }
        if !scale.contains(&self.factor_ii_critical_threshold) {
            return Err(ValidatorError::Config(format!(
                "factor_ii_critical_threshold {} is outside [{}, {}]",
                self.factor_ii_critical_threshold, MIN_SCORE, MAX_SCORE
            )));
        }
        if !scale.contains(&self.factor_ii_caution_threshold) {
            return Err(ValidatorError::Config(format!(
                "factor_ii_caution_threshold {} is outside [{}, {}]",
                self.factor_ii_caution_threshold, MIN_SCORE, MAX_SCORE
            )));
        }
        if self.factor_ii_caution_threshold > self.factor_ii_critical_threshold {
            return Err(ValidatorError::Config(format!(
                "factor_ii_caution_threshold {} must not exceed factor_ii_critical_threshold {}",
                self.factor_ii_caution_threshold, self.factor_ii_critical_threshold
            )));
        }

        Ok(())
    }
}
