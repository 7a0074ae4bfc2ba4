//! Dashboard loading with a per-user TTL cache

use crate::{
    aggregator, CacheMetadata, DashboardConfig, DashboardError, DashboardMetrics,
    ProcessedDashboardData,
};
use ssbmax_domain::traits::ResultSource;
use ssbmax_domain::{GtoTestType, OlqAnalysisResult, OlqDashboardData, PsychTest};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

struct CachedDashboard {
    data: ProcessedDashboardData,
    fetched_at: Instant,
}

/// Loads, aggregates and caches a candidate's OLQ dashboard
///
/// Fresh entries (younger than [`DashboardConfig::cache_ttl`]) are served
/// without touching the source. When a refresh fails and an expired entry
/// exists, the expired entry is served with `is_stale` set, unless
/// `serve_stale_on_error` is off.
///
/// # Examples
///
/// ```no_run
/// use ssbmax_dashboard::{DashboardConfig, DashboardService};
/// # use ssbmax_domain::traits::ResultSource;
/// # fn demo<S: ResultSource>(source: S) -> Result<(), Box<dyn std::error::Error>>
/// # where S::Error: std::fmt::Display {
/// let service = DashboardService::new(source, DashboardConfig::default())?;
///
/// let dashboard = service.load("cadet-42", false)?;
/// println!("Top qualities: {:?}", dashboard.top_olqs);
///
/// // After the candidate completes a test
/// service.invalidate("cadet-42");
/// # Ok(())
/// # }
/// ```
pub struct DashboardService<S> {
    source: S,
    config: DashboardConfig,
    cache: Mutex<HashMap<String, CachedDashboard>>,
    metrics: Mutex<DashboardMetrics>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl<S: ResultSource> DashboardService<S>
where
    S::Error: Display,
{
    /// Create a service over the given source
    pub fn new(source: S, config: DashboardConfig) -> Result<Self, DashboardError> {
        config.check()?;
        Ok(Self {
            source,
            config,
            cache: Mutex::new(HashMap::new()),
            metrics: Mutex::new(DashboardMetrics::new()),
        })
    }

    /// Create a service with the default configuration
    pub fn default_config(source: S) -> Self {
        Self {
            source,
            config: DashboardConfig::default(),
            cache: Mutex::new(HashMap::new()),
            metrics: Mutex::new(DashboardMetrics::new()),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Underlying result source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Snapshot of the counters
    pub fn metrics(&self) -> DashboardMetrics {
        lock(&self.metrics).clone()
    }

    /// Load the processed dashboard for a user
    ///
    /// `force_refresh` skips the fresh-cache check but still falls back to a
    /// cached snapshot if the source fails.
    ///
    /// # Errors
    /// Returns [`DashboardError::Source`] when the source fails and no cached
    /// snapshot may be served.
    pub fn load(
        &self,
        user_id: &str,
        force_refresh: bool,
    ) -> Result<ProcessedDashboardData, DashboardError> {
        let start = Instant::now();

        if !force_refresh {
            if let Some(hit) = self.fresh_entry(user_id, start) {
                lock(&self.metrics).record_hit();
                tracing::debug!(user_id, age_ms = hit.cache_metadata.age_ms, "Dashboard cache hit");
                return Ok(hit);
            }
        }

        lock(&self.metrics).record_miss();
        tracing::debug!(user_id, force_refresh, "Dashboard cache miss, fetching results");

        match self.fetch(user_id) {
            Ok((dashboard, skipped)) => {
                self.warn_on_empty_results(&dashboard, &skipped);
                let processed = aggregator::process(dashboard, self.config.ranking_size);

                lock(&self.cache).insert(
                    user_id.to_string(),
                    CachedDashboard {
                        data: processed.clone(),
                        fetched_at: Instant::now(),
                    },
                );

                let load_time_ms = millis(start.elapsed());
                tracing::debug!(user_id, load_time_ms, "Dashboard loaded from source");
                Ok(processed.with_cache_metadata(CacheMetadata {
                    is_cached: false,
                    is_stale: false,
                    age_ms: 0,
                    load_time_ms,
                    forced_refresh: force_refresh,
                }))
            }
            Err(e) => {
                lock(&self.metrics).record_fetch_failure();
                let message = format!("failed to load dashboard for {}: {}", user_id, e);

                if self.config.serve_stale_on_error {
                    if let Some(stale) = self.stale_entry(user_id, start, force_refresh) {
                        lock(&self.metrics).record_stale_serve();
                        tracing::warn!(
                            user_id,
                            age_ms = stale.cache_metadata.age_ms,
                            error = %e,
                            "Source failed, serving stale dashboard"
                        );
                        return Ok(stale);
                    }
                }

                tracing::warn!(user_id, error = %e, "Dashboard load failed");
                Err(DashboardError::Source(message))
            }
        }
    }

    /// Drop the cached dashboard for a user
    ///
    /// Call after the user completes a test so the next load refetches.
    pub fn invalidate(&self, user_id: &str) {
        if lock(&self.cache).remove(user_id).is_some() {
            tracing::debug!(user_id, "Dashboard cache invalidated");
        }
        lock(&self.metrics).record_invalidation();
    }

    /// Drop every cached dashboard
    pub fn invalidate_all(&self) {
        let mut cache = lock(&self.cache);
        let dropped = cache.len();
        cache.clear();
        drop(cache);

        lock(&self.metrics).record_invalidation();
        tracing::debug!(dropped, "Dashboard cache cleared");
    }

    /// Number of users with a cached dashboard
    pub fn cached_users(&self) -> usize {
        lock(&self.cache).len()
    }

    fn fresh_entry(&self, user_id: &str, start: Instant) -> Option<ProcessedDashboardData> {
        let cache = lock(&self.cache);
        let entry = cache.get(user_id)?;
        let age = entry.fetched_at.elapsed();
        if age >= self.config.cache_ttl() {
            return None;
        }

        Some(entry.data.with_cache_metadata(CacheMetadata {
            is_cached: true,
            is_stale: false,
            age_ms: millis(age),
            load_time_ms: millis(start.elapsed()),
            forced_refresh: false,
        }))
    }

    fn stale_entry(
        &self,
        user_id: &str,
        start: Instant,
        forced_refresh: bool,
    ) -> Option<ProcessedDashboardData> {
        let cache = lock(&self.cache);
        let entry = cache.get(user_id)?;
        let age = entry.fetched_at.elapsed();

        // A forced refresh can fail while the entry is still within its TTL
        Some(entry.data.with_cache_metadata(CacheMetadata {
            is_cached: true,
            is_stale: age >= self.config.cache_ttl(),
            age_ms: millis(age),
            load_time_ms: millis(start.elapsed()),
            forced_refresh,
        }))
    }

    /// Assemble the dashboard, returning GTO results left out for lacking scores
    fn fetch(
        &self,
        user_id: &str,
    ) -> Result<(OlqDashboardData, Vec<OlqAnalysisResult>), S::Error> {
        let mut dashboard = OlqDashboardData::empty(user_id);
        let mut skipped = Vec::new();

        dashboard.phase1_results.oir_result = self.source.latest_oir_result(user_id)?;
        let ppdt = self.source.latest_ppdt_submission(user_id)?;
        if let Some(submission) = &ppdt {
            dashboard.phase1_results.ppdt_olq_result =
                self.source.ppdt_result(user_id, &submission.submission_id)?;
        }
        dashboard.phase1_results.ppdt_submission = ppdt;

        for test in PsychTest::ALL {
            *dashboard.phase2_results.psych_mut(test) =
                self.source.latest_psych_result(user_id, test)?;
        }
        for test in GtoTestType::ALL {
            match self.source.latest_gto_result(user_id, test)? {
                Some(result) if result.is_empty() => skipped.push(result),
                Some(result) => {
                    dashboard.phase2_results.gto_results.insert(test, result);
                }
                None => {}
            }
        }
        dashboard.phase2_results.interview_result =
            self.source.latest_interview_result(user_id)?;

        Ok((dashboard, skipped))
    }

    fn warn_on_empty_results(&self, dashboard: &OlqDashboardData, skipped: &[OlqAnalysisResult]) {
        let empty: Vec<String> = dashboard
            .analysis_results()
            .into_iter()
            .chain(skipped)
            .filter(|r| r.is_empty())
            .map(|r| format!("{} ({})", r.test_type().label(), r.submission_id()))
            .collect();

        if !empty.is_empty() {
            tracing::warn!(
                user_id = %dashboard.user_id,
                results = ?empty,
                "Analysis results without OLQ scores contribute nothing to averages"
            );
            lock(&self.metrics).record_empty_results(empty.len());
        }

        for (expected, result) in dashboard.misfiled_results() {
            tracing::warn!(
                user_id = %dashboard.user_id,
                submission_id = %result.submission_id(),
                expected = expected.label(),
                actual = result.test_type().label(),
                "Analysis result filed under the wrong test"
            );
        }
    }
}
