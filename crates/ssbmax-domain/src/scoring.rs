//! SSB scoring rules and constants
//!
//! Every piece of code that needs a scoring threshold reads it from here.
//!
//! - Limitation: any OLQ score of 8 or worse (1-10 scale, lower is better)
//! - Factor: group of related OLQs (I, II, III, IV)
//! - Critical quality: OLQ that warrants rejection when weak

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum possible score (exceptional, rare)
pub const MIN_SCORE: u8 = 1;

/// Maximum possible score (very poor)
pub const MAX_SCORE: u8 = 10;

/// Practical best score used when prompting graders; most candidates don't score below 5
pub const PRACTICAL_MIN_SCORE: u8 = 5;

/// Practical worst score (fail / gibberish); 10 is extremely rare
pub const PRACTICAL_MAX_SCORE: u8 = 9;

/// Centre of the SSB bell curve
pub const AVERAGE_EXPECTED_SCORE: u8 = 7;

/// Score at which a quality becomes a limitation
pub const LIMITATION_THRESHOLD: u8 = 8;

/// Maximum limitations for NDA entry
pub const MAX_LIMITATIONS_NDA: u32 = 4;

/// Maximum limitations for OTA entry
pub const MAX_LIMITATIONS_OTA: u32 = 7;

/// Maximum limitations for graduate entry (CDS, TGC, ...)
pub const MAX_LIMITATIONS_GRADUATE: u32 = 7;

/// Maximum spread between scores within one factor
pub const MAX_TICK_VARIATION_WITHIN_FACTOR: u8 = 1;

/// Maximum spread between factor averages
pub const MAX_TICK_VARIATION_BETWEEN_FACTORS: u8 = 2;

/// Factor II average at or above this is an automatic rejection
pub const FACTOR_II_CRITICAL_THRESHOLD: u8 = 8;

/// Factor II average at this level is cleared with caution
pub const FACTOR_II_CAUTION_THRESHOLD: u8 = 7;

/// Number of SSB factors
pub const FACTOR_COUNT: usize = 4;

/// Candidate entry scheme, which sets the tolerated number of limitations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// National Defence Academy (most stringent)
    Nda,
    /// Officers Training Academy (short service)
    Ota,
    /// Graduate direct entry
    Graduate,
}

impl EntryType {
    /// Maximum number of limitations tolerated for this entry
    pub fn max_limitations(&self) -> u32 {
        match self {
            EntryType::Nda => MAX_LIMITATIONS_NDA,
            EntryType::Ota => MAX_LIMITATIONS_OTA,
            EntryType::Graduate => MAX_LIMITATIONS_GRADUATE,
        }
    }

    /// Entry name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Nda => "NDA",
            EntryType::Ota => "OTA",
            EntryType::Graduate => "GRADUATE",
        }
    }

    /// Parse an entry type (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nda" => Some(EntryType::Nda),
            "ota" => Some(EntryType::Ota),
            "graduate" | "cds" | "tgc" => Some(EntryType::Graduate),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid entry type: {}", s))
    }
}

/// Whether a score qualifies as a limitation (`score >= 8`)
pub fn is_limitation(score: u8) -> bool {
    score >= LIMITATION_THRESHOLD
}

/// Maximum allowed limitations for an entry type
pub fn max_limitations(entry_type: EntryType) -> u32 {
    entry_type.max_limitations()
}

/// Whether scores within one factor stay within one tick of each other
///
/// Empty and single-score slices are trivially consistent.
pub fn is_within_factor_consistency(scores: &[u8]) -> bool {
    let (Some(min), Some(max)) = (scores.iter().min(), scores.iter().max()) else {
        return true;
    };

    max - min <= MAX_TICK_VARIATION_WITHIN_FACTOR
}
