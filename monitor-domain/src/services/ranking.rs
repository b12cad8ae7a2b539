// Ordering and de-duplication of the monitored set

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::entities::AllianceRecord;

/// Most recently active first; alliances without any login sort last and
/// compare equal to each other.
pub fn compare_by_recent_login(a: &AllianceRecord, b: &AllianceRecord) -> Ordering {
    match (a.last_login_time(), b.last_login_time()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => right.cmp(&left),
    }
}

pub fn rank_for_display(alliances: &mut [AllianceRecord]) {
    alliances.sort_by(compare_by_recent_login);
}

/// Keeps the first alliance seen for each id.
pub fn dedup_by_id(alliances: Vec<AllianceRecord>) -> Vec<AllianceRecord> {
    let mut seen = HashSet::new();
    alliances
        .into_iter()
        .filter(|alliance| seen.insert(alliance.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PlayerSummary;
    use crate::value_objects::{AllianceId, PlayerId};
    use chrono::{DateTime, Duration, Utc};

    fn alliance(id: i64, last_login: Option<DateTime<Utc>>) -> AllianceRecord {
        let mut alliance = AllianceRecord::default();
        alliance.id = AllianceId(id);
        alliance.players = vec![PlayerSummary {
            id: PlayerId(id),
            last_login,
        }];
        alliance
    }

    #[test]
    fn unset_logins_compare_equal_and_rank_last() {
        let now = Utc::now();
        let never_a = alliance(1, None);
        let never_b = alliance(2, None);
        let old = alliance(3, Some(now - Duration::days(400)));

        assert_eq!(compare_by_recent_login(&never_a, &never_b), Ordering::Equal);
        assert_eq!(compare_by_recent_login(&never_a, &old), Ordering::Greater);
        assert_eq!(compare_by_recent_login(&old, &never_b), Ordering::Less);
    }

    #[test]
    fn ranking_orders_by_login_descending() {
        let now = Utc::now();
        let mut alliances = vec![
            alliance(1, None),
            alliance(2, Some(now - Duration::days(9))),
            alliance(3, Some(now - Duration::days(1))),
            alliance(4, None),
            alliance(5, Some(now - Duration::days(4))),
        ];
        rank_for_display(&mut alliances);
        let ids = alliances.iter().map(|a| a.id.0).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 5, 2, 1, 4]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut first = alliance(1, None);
        first.name = "x".to_string();
        let mut second = alliance(1, None);
        second.name = "y".to_string();
        let other = alliance(2, None);

        let merged = dedup_by_id(vec![first, other, second]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "x");
        assert_eq!(merged[1].id, AllianceId(2));
    }
}
