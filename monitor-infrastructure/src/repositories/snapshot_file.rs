use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use monitor_domain::{AllianceRecord, SnapshotDocument, SnapshotRepository};

/// Monitored set stored as a pretty-printed JSON document on disk.
pub struct SnapshotFileRepository {
    path: PathBuf,
    default_max_members: u32,
}

impl SnapshotFileRepository {
    pub fn new(path: impl Into<PathBuf>, default_max_members: u32) -> Self {
        Self {
            path: path.into(),
            default_max_members,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[async_trait]
impl SnapshotRepository for SnapshotFileRepository {
    async fn load(&self) -> anyhow::Result<Vec<AllianceRecord>> {
        if !self.path.exists() {
            debug!("no snapshot at {}", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        let document: SnapshotDocument = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(document.into_records(self.default_max_members))
    }

    async fn save(&self, alliances: &[AllianceRecord]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(&SnapshotDocument::new(alliances))?;
        // Replace by rename so a failed write never truncates the old snapshot.
        let staging = self.staging_path();
        fs::write(&staging, content)
            .await
            .with_context(|| format!("writing {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    async fn delete(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .with_context(|| format!("removing {}", self.path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use monitor_domain::{AllianceId, PlayerId, PlayerSummary};
    use serde_json::Value;
    use tempfile::TempDir;

    fn sample() -> AllianceRecord {
        let mut alliance = AllianceRecord::named("Night Owls", 40);
        alliance.id = AllianceId(4242);
        alliance.is_public = true;
        alliance.level = 12;
        alliance.last_update_time = DateTime::<Utc>::from_timestamp(1_700_000_000, 0);
        alliance.players = vec![PlayerSummary {
            id: PlayerId(11),
            last_login: DateTime::<Utc>::from_timestamp(1_699_990_000, 0),
        }];
        alliance
    }

    #[tokio::test]
    async fn missing_snapshot_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SnapshotFileRepository::new(temp_dir.path().join("alliances.json"), 40);
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saved_snapshot_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SnapshotFileRepository::new(temp_dir.path().join("data/alliances.json"), 40);

        repo.save(&[sample()]).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded, vec![sample()]);
        assert!(!repo.staging_path().exists());
    }

    #[tokio::test]
    async fn snapshot_is_wrapped_in_value_key() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SnapshotFileRepository::new(temp_dir.path().join("alliances.json"), 40);
        repo.save(&[sample()]).await.unwrap();

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        let document: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(document["Value"][0]["id"], 4242);
        assert_eq!(document["Value"][0]["name"], "Night Owls");
    }

    #[tokio::test]
    async fn delete_removes_snapshot_and_tolerates_absence() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SnapshotFileRepository::new(temp_dir.path().join("alliances.json"), 40);
        repo.save(&[sample()]).await.unwrap();

        repo.delete().await.unwrap();
        assert!(!repo.path().exists());
        repo.delete().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("alliances.json");
        std::fs::write(&path, "{ not json").unwrap();
        let repo = SnapshotFileRepository::new(&path, 40);

        let err = repo.load().await.expect_err("corrupt snapshot");
        assert!(format!("{:#}", err).contains("parsing"));
    }

    #[tokio::test]
    async fn entries_without_capacity_use_configured_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("alliances.json");
        std::fs::write(&path, r#"{ "Value": [ { "id": 9, "name": "Old" } ] }"#).unwrap();
        let repo = SnapshotFileRepository::new(&path, 45);

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded[0].max_members, 45);
    }
}
