use anyhow::Result;
use tracing::info;

use monitor_application::commands::monitor_commands::run_monitoring_pass;
use monitor_application::{AppState, PassSummary};
use monitor_infrastructure::AppConfig;

use crate::context::AppContext;

pub async fn run_with_config(config: &AppConfig) -> Result<()> {
    info!(
        "monitoring via {} with snapshot {}",
        config.server_url, config.snapshot_path
    );
    let context = AppContext::new(config)?;
    let summary = run_pass(&context.state).await?;
    for line in summary.listing() {
        println!("{}", line);
    }
    println!("{}", summary.summary_line());
    Ok(())
}

/// Runs one pass; a pass that aborts is returned as the error so the
/// process exits nonzero.
pub async fn run_pass(state: &AppState) -> Result<PassSummary> {
    let summary = run_monitoring_pass(state).await?;
    info!(
        "pass finished in {} suggestion pages and {} detail requests",
        state.metrics.suggestion_pages(),
        state.metrics.refresh_requests()
    );
    Ok(summary)
}
