use std::sync::Arc;

use anyhow::Result;

use monitor_application::AppState;
use monitor_domain::ports::{AllianceGateway, SnapshotRepository};
use monitor_infrastructure::{AppConfig, HttpAllianceGateway, SnapshotFileRepository};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let gateway: Arc<dyn AllianceGateway> =
            Arc::new(HttpAllianceGateway::new(config.to_gateway_config())?);
        let snapshot_repo: Arc<dyn SnapshotRepository> = Arc::new(SnapshotFileRepository::new(
            &config.snapshot_path,
            config.default_max_members,
        ));

        let state = AppState::new(config.to_monitor_config(), gateway, snapshot_repo);
        Ok(Self { state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_carries_monitor_settings() {
        let config = AppConfig {
            target_size: 12,
            max_suggestion_pages: 0,
            ..AppConfig::default()
        };
        let context = AppContext::new(&config).unwrap();
        assert_eq!(context.state.config.target_size, 12);
        assert_eq!(context.state.config.max_suggestion_pages, None);
        assert_eq!(context.state.config.default_max_members, 40);
    }
}
