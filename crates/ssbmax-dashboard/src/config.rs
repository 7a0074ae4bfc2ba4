//! Configuration for dashboard loading
//!
//! Defines the cache TTL, ranking size and stale-fallback policy.

use crate::DashboardError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the dashboard service
///
/// # Examples
///
/// ```
/// use ssbmax_dashboard::DashboardConfig;
///
/// // Default configuration (five minute cache)
/// let config = DashboardConfig::default();
/// assert_eq!(config.cache_ttl_secs, 300);
///
/// // Always fetch fresh data
/// let config = DashboardConfig::no_cache();
/// assert_eq!(config.cache_ttl_secs, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// How long a processed dashboard stays fresh (in seconds)
    /// Default: 300 (5 minutes)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Number of qualities in the top and improvement lists
    /// Default: 3
    #[serde(default = "default_ranking_size")]
    pub ranking_size: usize,

    /// Serve an expired snapshot when a refresh fails
    /// Default: true
    #[serde(default = "default_serve_stale_on_error")]
    pub serve_stale_on_error: bool,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_ranking_size() -> usize {
    3
}

fn default_serve_stale_on_error() -> bool {
    true
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            ranking_size: default_ranking_size(),
            serve_stale_on_error: default_serve_stale_on_error(),
        }
    }
}

impl DashboardConfig {
    /// Configuration that never serves from cache
    ///
    /// Every load hits the source. A failed refresh is still reported as an
    /// error rather than masked by an old snapshot.
    pub fn no_cache() -> Self {
        Self {
            cache_ttl_secs: 0,
            serve_stale_on_error: false,
            ..Self::default()
        }
    }

    /// Cache TTL as Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Parse a configuration from TOML (missing keys take defaults)
    pub fn from_toml_str(content: &str) -> Result<Self, DashboardError> {
        let config: Self =
            toml::from_str(content).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DashboardError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Reject settings the service cannot work with
    pub fn check(&self) -> Result<(), DashboardError> {
        if self.ranking_size == 0 {
            return Err(DashboardError::Config(
                "ranking_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
