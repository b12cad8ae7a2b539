// Tolerant payload ingest
// Applies game-server JSON onto existing records one field at a time

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::entities::{AllianceRecord, PlayerSummary};
use crate::value_objects::{AllianceId, PlayerId};

/// Read-only view over a payload with a movable lookup scope.
///
/// Every accessor returns `None` when the key is absent or its value has the
/// wrong kind, so callers apply a field only when the payload carries it.
#[derive(Debug, Clone, Copy)]
pub struct PayloadCursor<'a> {
    scope: &'a Value,
}

impl<'a> PayloadCursor<'a> {
    pub fn new(payload: &'a Value) -> Self {
        Self { scope: payload }
    }

    /// Rebinds later lookups to the object under `key`, if there is one.
    pub fn descend(&mut self, key: &str) -> bool {
        match self.scope.get(key).filter(|value| value.is_object()) {
            Some(inner) => {
                self.scope = inner;
                true
            }
            None => false,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.scope.get(key)?.as_i64()
    }

    pub fn bounded<T: TryFrom<i64>>(&self, key: &str) -> Option<T> {
        self.integer(key).and_then(|value| T::try_from(value).ok())
    }

    pub fn text(&self, key: &str) -> Option<&'a str> {
        self.scope.get(key)?.as_str()
    }

    pub fn array(&self, key: &str) -> Option<&'a [Value]> {
        self.scope.get(key)?.as_array().map(Vec::as_slice)
    }

    /// Integer seconds since the Unix epoch.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.integer(key)
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
    }

    /// Base64-encoded UTF-8 text; undecodable input counts as absent.
    pub fn base64_text(&self, key: &str) -> Option<String> {
        let encoded = self.text(key)?;
        let bytes = STANDARD.decode(encoded.trim()).ok()?;
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl AllianceRecord {
    /// Applies every recognised field present in `payload`, in server order.
    ///
    /// `desc` and `pgld` are descended into when present, so keys after them
    /// are read from the nested object.
    pub fn ingest(&mut self, payload: &Value) {
        let mut cursor = PayloadCursor::new(payload);
        if let Some(server_time) = cursor.timestamp("now") {
            self.last_update_time = Some(server_time);
        }
        cursor.descend("desc");
        if let Some(members) = cursor.array("mems") {
            self.ingest_members(members);
        }
        cursor.descend("pgld");
        if let Some(name) = cursor.base64_text("gname") {
            self.name = name;
        }
        if let Some(id) = cursor.integer("guID") {
            self.id = AllianceId(id);
        }
        if let Some(experience) = cursor.integer("wExp") {
            self.weekly_experience = experience;
        }
        if let Some(auto_join) = cursor.integer("autoJoinYN") {
            self.is_public = auto_join == 1;
        }
        if let Some(level) = cursor.bounded("glv") {
            self.level = level;
        }
        if let Some(level) = cursor.bounded("sLv") {
            self.shop_level = level;
        }
        if let Some(level) = cursor.bounded("lvt") {
            self.required_level = level;
        }
    }

    /// Replaces the member list only when at least one member has an id, so
    /// an empty or unusable array never erases known members.
    fn ingest_members(&mut self, members: &[Value]) {
        let players = members
            .iter()
            .map(PlayerSummary::from_payload)
            .filter(|player| !player.id.is_unset())
            .collect::<Vec<_>>();
        if !players.is_empty() {
            self.players = players;
        }
    }

    pub fn from_payload(payload: &Value, default_max_members: u32) -> Self {
        let mut alliance = Self::new(default_max_members);
        alliance.ingest(payload);
        alliance
    }
}

impl PlayerSummary {
    pub fn ingest(&mut self, payload: &Value) {
        let cursor = PayloadCursor::new(payload);
        if let Some(id) = cursor.integer("uID") {
            self.id = PlayerId(id);
        }
        if let Some(last_login) = cursor.timestamp("llTime") {
            self.last_login = Some(last_login);
        }
    }

    pub fn from_payload(payload: &Value) -> Self {
        let mut player = Self::default();
        player.ingest(payload);
        player
    }
}

/// Alliances listed under `desc.sgs` of a suggestion response.
///
/// Entries without an id are dropped.
pub fn suggestions_from_payload(payload: &Value, default_max_members: u32) -> Vec<AllianceRecord> {
    let mut cursor = PayloadCursor::new(payload);
    if !cursor.descend("desc") {
        return Vec::new();
    }
    let Some(entries) = cursor.array("sgs") else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| AllianceRecord::from_payload(entry, default_max_members))
        .filter(|alliance| !alliance.id.is_unset())
        .collect()
}
