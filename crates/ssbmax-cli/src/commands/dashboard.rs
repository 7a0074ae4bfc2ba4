//! Dashboard command implementation.

use crate::cli::DashboardArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::source::SnapshotSource;
use ssbmax_dashboard::{DashboardService, ProcessedDashboardData};

/// Execute the dashboard command.
pub fn execute_dashboard(args: DashboardArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let processed = load_dashboard(&args, config)?;
    println!("{}", formatter.format_dashboard(&processed)?);
    Ok(())
}

/// Load and aggregate the dashboard a snapshot holds for one user.
pub fn load_dashboard(args: &DashboardArgs, config: &Config) -> Result<ProcessedDashboardData> {
    let source = SnapshotSource::from_file(&args.snapshot)?;

    let mut dashboard_config = config.dashboard.clone();
    if let Some(top) = args.top {
        dashboard_config.ranking_size = top;
    }

    let service = DashboardService::new(source, dashboard_config)?;
    let processed = service.load(&args.user, false)?;
    tracing::debug!(
        user_id = %args.user,
        qualities = processed.average_olq_scores.len(),
        "Dashboard aggregated"
    );
    Ok(processed)
}
