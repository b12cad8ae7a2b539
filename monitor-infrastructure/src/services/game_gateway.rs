use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use monitor_domain::ports::{AllianceGateway, GatewayError};
use monitor_domain::{suggestions_from_payload, AllianceRecord};

use crate::utils::{encode_guild_name, response_code};

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Base url ending in `/`; commands are appended to it.
    pub server_url: String,
    pub suggestion_lang: String,
    pub user_id: Option<String>,
    pub request_timeout_seconds: u64,
    pub default_max_members: u32,
}

/// Game server access over plain JSON GET requests.
pub struct HttpAllianceGateway {
    client: Client,
    config: GatewayConfig,
    started: Instant,
}

impl HttpAllianceGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            config,
            started: Instant::now(),
        })
    }

    /// Seconds since the gateway was created, sent as the `cKey` the server
    /// expects on every request.
    fn uptime_key(&self) -> String {
        format!("{:.3}", self.started.elapsed().as_secs_f32())
    }

    async fn request(&self, command: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.config.server_url, command);
        let mut query = params.to_vec();
        if let Some(user_id) = &self.config.user_id {
            query.push(("uID", user_id.clone()));
        }
        query.push(("cKey", self.uptime_key()));

        debug!("gateway request: {}", command);
        let payload = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(payload)
    }

    async fn search_alliance(&self, name: &str) -> Result<AllianceRecord, GatewayError> {
        let payload = self
            .request("SearchAlliance", &[("guildName", encode_guild_name(name))])
            .await?;
        ensure_success(&payload)?;
        let mut alliance = AllianceRecord::named(name, self.config.default_max_members);
        alliance.ingest(&payload);
        Ok(alliance)
    }
}

fn ensure_success(payload: &Value) -> Result<(), GatewayError> {
    match response_code(payload) {
        Some(0) => Ok(()),
        Some(code) => Err(GatewayError::Rejected { code }),
        None => Err(GatewayError::Transport(anyhow!("response carries no status code"))),
    }
}

#[async_trait]
impl AllianceGateway for HttpAllianceGateway {
    async fn refresh_alliance(&self, alliance: &mut AllianceRecord) -> Result<(), GatewayError> {
        let mut id = alliance.id;
        if id.is_unset() {
            if alliance.name.trim().is_empty() {
                return Err(GatewayError::MissingIdentity);
            }
            id = self.search_alliance(&alliance.name).await?.id;
            if id.is_unset() {
                return Err(GatewayError::Unresolvable(alliance.name.clone()));
            }
        }

        let payload = self
            .request("ViewAllianceInfo", &[("guID", id.to_string())])
            .await?;
        ensure_success(&payload)?;
        alliance.id = id;
        alliance.ingest(&payload);
        Ok(())
    }

    async fn suggested_alliances(&self) -> Result<Vec<AllianceRecord>> {
        let payload = self
            .request(
                "GetSuggestionAllianceList",
                &[("lang", self.config.suggestion_lang.clone())],
            )
            .await?;
        ensure_success(&payload)?;
        Ok(suggestions_from_payload(
            &payload,
            self.config.default_max_members,
        ))
    }
}
