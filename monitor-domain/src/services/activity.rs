// Activity evaluation
// Pure predicates deciding whether an alliance is still worth monitoring

use chrono::{DateTime, Duration, Utc};

use crate::entities::AllianceRecord;

/// No weekly contribution and still room to join.
pub fn is_still_qualifying(alliance: &AllianceRecord) -> bool {
    alliance.weekly_experience == 0 && !alliance.is_full()
}

/// Time elapsed since the alliance was last refreshed, zero if it never was.
pub fn since_last_check(alliance: &AllianceRecord, now: DateTime<Utc>) -> Duration {
    alliance
        .last_update_time
        .map(|updated| now - updated)
        .unwrap_or_else(Duration::zero)
}

/// True when some member logged in within `since_last_check` of `now`.
///
/// An alliance with no recorded login never shows new activity. A
/// never-checked alliance gets a zero window, so only a login stamped at
/// `now` itself counts against it.
pub fn has_new_activity_since_last_check(
    alliance: &AllianceRecord,
    now: DateTime<Utc>,
    since_last_check: Duration,
) -> bool {
    match alliance.last_login_time() {
        Some(last_login) => now - last_login <= since_last_check,
        None => false,
    }
}

/// Inactive strictly longer than `min_days`.
pub fn is_inactive_for(alliance: &AllianceRecord, now: DateTime<Utc>, min_days: f64) -> bool {
    alliance.days_inactive(now) > min_days
}
