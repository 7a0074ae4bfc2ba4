//! Metrics collection for dashboard loads

/// Cache and source counters collected by the dashboard service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    /// Loads answered from a fresh cache entry
    pub cache_hits: usize,

    /// Loads that went to the source (expired, absent or forced)
    pub cache_misses: usize,

    /// Loads answered from an expired entry after a failed refresh
    pub stale_serves: usize,

    /// Cache entries dropped on request
    pub invalidations: usize,

    /// Source fetches that failed
    pub fetch_failures: usize,

    /// Results skipped because they carried no scores
    pub empty_results: usize,
}

impl DashboardMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh cache hit
    pub fn record_hit(&mut self) {
        self.cache_hits += 1;
    }

    /// Record a cache miss
    pub fn record_miss(&mut self) {
        self.cache_misses += 1;
    }

    /// Record a stale snapshot served after a failure
    pub fn record_stale_serve(&mut self) {
        self.stale_serves += 1;
    }

    /// Record a cache invalidation
    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    /// Record a failed fetch
    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    /// Record results that carried no scores
    pub fn record_empty_results(&mut self, count: usize) {
        self.empty_results += count;
    }

    /// Total loads served
    pub fn total_loads(&self) -> usize {
        self.cache_hits + self.cache_misses
    }

    /// Fraction of loads answered from a fresh cache entry
    pub fn hit_rate(&self) -> f64 {
        match self.total_loads() {
            0 => 0.0,
            total => self.cache_hits as f64 / total as f64,
        }
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Dashboard Metrics Summary".to_string(),
            "=========================".to_string(),
            format!("Loads: {}", self.total_loads()),
            format!(
                "Cache hits: {} ({:.0}%)",
                self.cache_hits,
                self.hit_rate() * 100.0
            ),
            format!("Cache misses: {}", self.cache_misses),
            format!("Invalidations: {}", self.invalidations),
        ];

        if self.fetch_failures > 0 {
            lines.push(format!("Fetch failures: {}", self.fetch_failures));
            lines.push(format!("Stale snapshots served: {}", self.stale_serves));
        }
        if self.empty_results > 0 {
            lines.push(format!("Results without scores: {}", self.empty_results));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = DashboardMetrics::new();
        assert_eq!(metrics.total_loads(), 0);
        assert_eq!(metrics.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let mut metrics = DashboardMetrics::new();
        metrics.record_miss();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();

        assert_eq!(metrics.total_loads(), 4);
        assert_eq!(metrics.hit_rate(), 0.75);
    }

    #[test]
    fn test_reset() {
        let mut metrics = DashboardMetrics::new();
        metrics.record_hit();
        metrics.record_invalidation();
        metrics.record_fetch_failure();

        metrics.reset();
        assert_eq!(metrics, DashboardMetrics::default());
    }

    #[test]
    fn test_summary() {
        let mut metrics = DashboardMetrics::new();
        metrics.record_miss();
        metrics.record_hit();
        metrics.record_invalidation();
        metrics.record_fetch_failure();
        metrics.record_stale_serve();

        let summary = metrics.summary();
        assert!(summary.contains("Loads: 2"));
        assert!(summary.contains("Cache hits: 1 (50%)"));
        assert!(summary.contains("Invalidations: 1"));
        assert!(summary.contains("Fetch failures: 1"));
        assert!(summary.contains("Stale snapshots served: 1"));
        assert!(!summary.contains("without scores"));
    }
}
