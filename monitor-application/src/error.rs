use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load monitored alliances: {0:#}")]
    SnapshotLoad(anyhow::Error),
    #[error("failed to save monitored alliances: {0:#}")]
    SnapshotSave(anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
