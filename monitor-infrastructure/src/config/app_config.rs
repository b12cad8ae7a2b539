use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use monitor_domain::MonitorConfig;

use crate::config::validation::{validate_server_url, validate_snapshot_path};
use crate::services::GatewayConfig;

pub const CONFIG_PATH_ENV: &str = "ALLIANCE_MONITOR_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub suggestion_lang: String,
    pub user_id: Option<String>,
    pub request_timeout_seconds: u64,
    pub snapshot_path: String,
    pub target_size: usize,
    pub min_days_inactive: f64,
    pub default_max_members: u32,
    /// Zero disables the page budget.
    pub max_suggestion_pages: u32,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080/".to_string(),
            suggestion_lang: String::new(),
            user_id: None,
            request_timeout_seconds: 15,
            snapshot_path: "./alliances.json".to_string(),
            target_size: 100,
            min_days_inactive: 0.0,
            default_max_members: 40,
            max_suggestion_pages: 1000,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)?
        } else {
            warn!("config.toml not found, using defaults");
            AppConfig::default()
        };
        config.prepare(file_path.parent(), |key| env::var(key).ok())?;
        Ok(config)
    }

    /// Paths from the file resolve against its directory; overrides are
    /// applied afterwards so they stay relative to the working directory.
    fn prepare(
        &mut self,
        base_dir: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        self.resolve_paths(base_dir);
        self.apply_overrides(lookup);
        self.normalize();
        self.validate()
    }

    pub fn normalize(&mut self) {
        self.server_url = self.server_url.trim().to_string();
        if !self.server_url.is_empty() && !self.server_url.ends_with('/') {
            self.server_url.push('/');
        }
        self.suggestion_lang = self.suggestion_lang.trim().to_string();
        if let Some(user_id) = &self.user_id {
            if user_id.trim().is_empty() {
                self.user_id = None;
            }
        }
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.snapshot_path = resolve_path(base, &self.snapshot_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_server_url(&self.server_url)?;
        validate_snapshot_path(&self.snapshot_path)?;
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.default_max_members == 0 {
            return Err(anyhow!("default_max_members must be greater than 0"));
        }
        if !self.min_days_inactive.is_finite() || self.min_days_inactive < 0.0 {
            return Err(anyhow!("min_days_inactive must be a non-negative number"));
        }
        Ok(())
    }

    pub fn to_monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            target_size: self.target_size,
            min_days_inactive: self.min_days_inactive,
            default_max_members: self.default_max_members,
            max_suggestion_pages: (self.max_suggestion_pages > 0)
                .then_some(self.max_suggestion_pages),
        }
    }

    pub fn to_gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            server_url: self.server_url.clone(),
            suggestion_lang: self.suggestion_lang.clone(),
            user_id: self.user_id.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            default_max_members: self.default_max_members,
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("ALLIANCE_MONITOR_SERVER_URL") {
            self.server_url = value;
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_SUGGESTION_LANG") {
            self.suggestion_lang = value;
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_USER_ID") {
            self.user_id = Some(value);
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_SNAPSHOT_PATH") {
            self.snapshot_path = value;
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_TARGET_SIZE") {
            self.target_size = value.parse().unwrap_or(self.target_size);
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_MIN_DAYS_INACTIVE") {
            self.min_days_inactive = value.parse().unwrap_or(self.min_days_inactive);
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_DEFAULT_MAX_MEMBERS") {
            self.default_max_members = value.parse().unwrap_or(self.default_max_members);
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_MAX_SUGGESTION_PAGES") {
            self.max_suggestion_pages = value.parse().unwrap_or(self.max_suggestion_pages);
        }
        if let Some(value) = lookup("ALLIANCE_MONITOR_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
