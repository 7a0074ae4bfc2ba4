//! Aggregated dashboard view

use serde::Serialize;
use ssbmax_domain::{Olq, OlqDashboardData};
use std::collections::BTreeMap;

/// How a processed dashboard was obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheMetadata {
    /// Served from the cache without touching the source
    pub is_cached: bool,
    /// Served from an expired cache entry after a failed refresh
    pub is_stale: bool,
    /// Age of the snapshot in milliseconds (0 when freshly fetched)
    pub age_ms: u64,
    /// Time spent producing this response in milliseconds
    pub load_time_ms: u64,
    /// The caller asked to bypass the cache
    pub forced_refresh: bool,
}

/// Dashboard data with per-quality aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedDashboardData {
    /// Raw per-test results
    pub dashboard: OlqDashboardData,
    /// Mean score per quality present in any result
    pub average_olq_scores: BTreeMap<Olq, f64>,
    /// Best (lowest) averages, best first
    pub top_olqs: Vec<(Olq, f64)>,
    /// Worst (highest) averages, worst first
    pub improvement_olqs: Vec<(Olq, f64)>,
    /// Mean of the per-quality averages, `None` without any scores
    pub overall_average_score: Option<f64>,
    /// Cache provenance
    pub cache_metadata: CacheMetadata,
}

impl ProcessedDashboardData {
    /// Whether any quality has been scored yet
    pub fn has_scores(&self) -> bool {
        !self.average_olq_scores.is_empty()
    }

    /// Copy with different cache metadata
    pub fn with_cache_metadata(&self, cache_metadata: CacheMetadata) -> Self {
        Self {
            cache_metadata,
            ..self.clone()
        }
    }
}
