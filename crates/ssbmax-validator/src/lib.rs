//! SSBMax Score Validator
//!
//! Applies the SSB selection rules to a set of OLQ scores.
//!
//! The validator provides:
//! - Limitation counting against the entry-type maximum
//! - Per-factor consistency checks (±1 tick for Factors I/II, ±2 for III/IV)
//! - Critical-quality weakness detection, including the Factor II auto-reject
//! - Factor averages
//! - A Recommended / Doubtful / Not Recommended verdict with reasons
//!
//! All checks are pure functions of their input.
//!
//! # Examples
//!
//! ```
//! use ssbmax_domain::{EntryType, Olq};
//! use ssbmax_validator::{Recommendation, ScoreValidator};
//! use std::collections::BTreeMap;
//!
//! let validator = ScoreValidator::default_config();
//! let scores: BTreeMap<Olq, u8> = Olq::ALL.iter().map(|o| (*o, 6)).collect();
//!
//! let report = validator.validate(&scores, EntryType::Nda);
//! assert_eq!(report.recommendation_result.recommendation, Recommendation::Recommended);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod report;
mod validator;

pub use config::ValidationConfig;
pub use error::ValidatorError;
pub use report::{
    ConsistencyResult, CriticalWeaknessResult, FactorConsistencyDetail, LimitationResult,
    Recommendation, RecommendationResult, ValidationReport,
};
pub use validator::ScoreValidator;
