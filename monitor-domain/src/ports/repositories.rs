use async_trait::async_trait;

use crate::entities::AllianceRecord;

/// Storage for the monitored set between passes.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// The previously saved set, empty when no snapshot exists.
    async fn load(&self) -> anyhow::Result<Vec<AllianceRecord>>;
    async fn save(&self, alliances: &[AllianceRecord]) -> anyhow::Result<()>;
    /// Removes the snapshot; a missing snapshot is not an error.
    async fn delete(&self) -> anyhow::Result<()>;
}
