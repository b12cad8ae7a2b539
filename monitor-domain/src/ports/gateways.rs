use async_trait::async_trait;
use thiserror::Error;

use crate::entities::AllianceRecord;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("alliance has neither an id nor a name")]
    MissingIdentity,
    #[error("alliance {0} could not be resolved")]
    Unresolvable(String),
    #[error("server rejected request with code {code}")]
    Rejected { code: i64 },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Access to the game server's alliance data.
#[async_trait]
pub trait AllianceGateway: Send + Sync {
    /// Fetches the alliance's current state and ingests it onto `alliance`.
    ///
    /// An alliance without an id is first looked up by name. Any error means
    /// the alliance is no longer resolvable and leaves it unchanged. Fields
    /// missing from the response keep their previous values.
    async fn refresh_alliance(&self, alliance: &mut AllianceRecord) -> Result<(), GatewayError>;

    /// One page of suggested alliances. Pages overlap and carry incomplete data.
    async fn suggested_alliances(&self) -> anyhow::Result<Vec<AllianceRecord>>;
}
