//! SSBMax Dashboard
//!
//! Turns a candidate's per-test OLQ results into a single dashboard view.
//!
//! # Overview
//!
//! The dashboard layer is responsible for:
//! - **Aggregation**: mean score per quality across every available result
//! - **Ranking**: strongest and weakest qualities (ties in declaration order)
//! - **Caching**: per-user snapshots with a TTL and a stale fallback
//! - **Observation**: a reducer-driven state store and single-writer content flags
//!
//! Scores run 1-10 with lower being better, so the "top" qualities are the
//! ones with the lowest averages.
//!
//! # Usage
//!
//! ```
//! use ssbmax_dashboard::aggregator;
//! use ssbmax_domain::OlqDashboardData;
//!
//! let processed = aggregator::process(OlqDashboardData::empty("cadet-42"), 3);
//! assert!(processed.top_olqs.is_empty());
//! assert_eq!(processed.overall_average_score, None);
//! ```
//!
//! # Configuration
//!
//! The service can be configured via TOML:
//!
//! ```toml
//! [dashboard]
//! cache_ttl_secs = 300
//! ranking_size = 3
//! serve_stale_on_error = true
//! ```

#![warn(missing_docs)]

pub mod aggregator;
mod config;
mod error;
mod flags;
mod metrics;
mod processed;
mod service;
mod state;

pub use config::DashboardConfig;
pub use error::DashboardError;
pub use flags::{ContentFlags, ContentFlagsOwner, ContentFlagsReader};
pub use metrics::DashboardMetrics;
pub use processed::{CacheMetadata, ProcessedDashboardData};
pub use service::DashboardService;
pub use state::{reduce, DashboardEvent, DashboardState, DashboardStore};
