use std::sync::Arc;

use monitor_domain::ports::{AllianceGateway, SnapshotRepository};
use monitor_domain::MonitorConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: MonitorConfig,
    pub gateway: Arc<dyn AllianceGateway>,
    pub snapshot_repo: Arc<dyn SnapshotRepository>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: MonitorConfig,
        gateway: Arc<dyn AllianceGateway>,
        snapshot_repo: Arc<dyn SnapshotRepository>,
    ) -> Self {
        Self {
            config,
            gateway,
            snapshot_repo,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
