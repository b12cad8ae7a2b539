// Alliance entity
// One guild as last observed from the game server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::PlayerSummary;
use crate::value_objects::AllianceId;

/// Capacity assumed until a level-indexed capacity table is available.
pub const DEFAULT_MAX_MEMBERS: u32 = 40;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceRecord {
    pub id: AllianceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub shop_level: u32,
    #[serde(default)]
    pub required_level: u32,
    /// Zero when read from a snapshot that did not carry it; see
    /// [`AllianceRecord::with_default_capacity`].
    #[serde(default)]
    pub max_members: u32,
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
    /// Resets to zero at 01:00 UTC every Friday.
    #[serde(default)]
    pub weekly_experience: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl Default for AllianceRecord {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MEMBERS)
    }
}

impl AllianceRecord {
    pub fn new(default_max_members: u32) -> Self {
        Self {
            id: AllianceId::default(),
            name: String::new(),
            is_public: false,
            level: 0,
            shop_level: 0,
            required_level: 0,
            max_members: default_max_members,
            players: Vec::new(),
            weekly_experience: 0,
            last_update_time: None,
        }
    }

    pub fn named(name: impl Into<String>, default_max_members: u32) -> Self {
        Self {
            name: name.into(),
            ..Self::new(default_max_members)
        }
    }

    pub fn with_default_capacity(mut self, default_max_members: u32) -> Self {
        if self.max_members == 0 {
            self.max_members = default_max_members;
        }
        self
    }

    /// Most recent login of any member, `None` if nobody ever logged in.
    pub fn last_login_time(&self) -> Option<DateTime<Utc>> {
        self.players.iter().filter_map(|player| player.last_login).max()
    }

    /// Fractional days since the last member login.
    ///
    /// An alliance without any recorded login is measured from the Unix epoch,
    /// so the result is implausibly large and means "assume maximally
    /// inactive" rather than a literal duration.
    pub fn days_inactive(&self, now: DateTime<Utc>) -> f64 {
        let last_login = self.last_login_time().unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        (now - last_login).num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    pub fn member_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.member_count() >= self.max_members as usize
    }

    pub fn is_over_capacity(&self) -> bool {
        self.member_count() > self.max_members as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::PlayerId;
    use chrono::Duration;

    fn player(id: i64, last_login: Option<DateTime<Utc>>) -> PlayerSummary {
        PlayerSummary {
            id: PlayerId(id),
            last_login,
        }
    }

    #[test]
    fn last_login_time_is_latest_member_login() {
        let now = Utc::now();
        let mut alliance = AllianceRecord::default();
        alliance.players = vec![
            player(1, Some(now - Duration::days(5))),
            player(2, None),
            player(3, Some(now - Duration::days(2))),
        ];
        assert_eq!(alliance.last_login_time(), Some(now - Duration::days(2)));
    }

    #[test]
    fn last_login_time_is_unset_without_logins() {
        let mut alliance = AllianceRecord::default();
        assert_eq!(alliance.last_login_time(), None);
        alliance.players = vec![player(1, None)];
        assert_eq!(alliance.last_login_time(), None);
    }

    #[test]
    fn days_inactive_counts_fractional_days() {
        let now = Utc::now();
        let mut alliance = AllianceRecord::default();
        alliance.players = vec![player(1, Some(now - Duration::hours(36)))];
        let days = alliance.days_inactive(now);
        assert!((days - 1.5).abs() < 1e-9);
    }

    #[test]
    fn days_inactive_without_logins_is_never_smaller() {
        let now = Utc::now();
        let never = AllianceRecord::default();
        let mut epoch_login = AllianceRecord::default();
        epoch_login.players = vec![player(1, Some(DateTime::<Utc>::UNIX_EPOCH))];
        let mut recent = AllianceRecord::default();
        recent.players = vec![player(1, Some(now - Duration::days(3)))];

        assert!(never.days_inactive(now) >= epoch_login.days_inactive(now));
        assert!(never.days_inactive(now) >= recent.days_inactive(now));
        assert!(never.days_inactive(now) > 10_000.0);
    }

    #[test]
    fn capacity_checks_use_max_members() {
        let mut alliance = AllianceRecord::new(2);
        alliance.players = vec![player(1, None)];
        assert!(!alliance.is_full());
        alliance.players.push(player(2, None));
        assert!(alliance.is_full());
        assert!(!alliance.is_over_capacity());
        alliance.players.push(player(3, None));
        assert!(alliance.is_over_capacity());
    }

    #[test]
    fn missing_capacity_falls_back_to_default() {
        let alliance = AllianceRecord::new(0).with_default_capacity(50);
        assert_eq!(alliance.max_members, 50);
        let alliance = AllianceRecord::new(30).with_default_capacity(50);
        assert_eq!(alliance.max_members, 30);
    }
}
