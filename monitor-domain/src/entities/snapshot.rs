// Monitored-set snapshot document

use serde::{Deserialize, Serialize};

use crate::entities::AllianceRecord;

/// On-disk wrapper for the monitored set: `{"Value": [ ... ]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(rename = "Value", default)]
    pub value: Vec<AllianceRecord>,
}

impl SnapshotDocument {
    pub fn new(alliances: &[AllianceRecord]) -> Self {
        Self {
            value: alliances.to_vec(),
        }
    }

    pub fn into_records(self, default_max_members: u32) -> Vec<AllianceRecord> {
        self.value
            .into_iter()
            .map(|alliance| alliance.with_default_capacity(default_max_members))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::AllianceId;
    use serde_json::json;

    #[test]
    fn document_wraps_alliances_in_value_key() {
        let mut alliance = AllianceRecord::default();
        alliance.id = AllianceId(7);
        alliance.name = "Night Owls".to_string();
        let value = serde_json::to_value(SnapshotDocument::new(&[alliance])).expect("serialize");
        assert_eq!(value["Value"][0]["id"], json!(7));
        assert_eq!(value["Value"][0]["name"], json!("Night Owls"));
    }

    #[test]
    fn sparse_entries_pick_up_default_capacity() {
        let document: SnapshotDocument =
            serde_json::from_value(json!({ "Value": [ { "id": 3, "name": "Sparse" } ] }))
                .expect("deserialize");
        let records = document.into_records(40);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, AllianceId(3));
        assert_eq!(records[0].max_members, 40);
        assert!(records[0].players.is_empty());
        assert_eq!(records[0].last_update_time, None);
    }
}
