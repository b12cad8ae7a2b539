// Pass summary and human-readable listing

use chrono::{DateTime, Utc};

use monitor_domain::AllianceRecord;

#[derive(Debug, Clone)]
pub struct PassSummary {
    pub evaluated_at: DateTime<Utc>,
    /// Alliances loaded from the previous snapshot.
    pub checked: usize,
    pub discarded: usize,
    pub kept: usize,
    /// New alliances accepted by the top-up search.
    pub found: usize,
    pub duplicates_removed: usize,
    pub search_ran: bool,
    /// The top-up stopped on its page budget before finding enough alliances.
    pub search_exhausted: bool,
    /// The persisted set, most recently active first.
    pub alliances: Vec<AllianceRecord>,
}

impl PassSummary {
    pub fn new(evaluated_at: DateTime<Utc>) -> Self {
        Self {
            evaluated_at,
            checked: 0,
            discarded: 0,
            kept: 0,
            found: 0,
            duplicates_removed: 0,
            search_ran: false,
            search_exhausted: false,
            alliances: Vec::new(),
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "checked {}, discarded {}, kept {}, found {}, monitoring {}",
            self.checked,
            self.discarded,
            self.kept,
            self.found,
            self.alliances.len()
        )
    }

    /// The monitored set, most inactive first, grouped under
    /// "Inactive more than N days:" headings.
    pub fn listing(&self) -> Vec<String> {
        if self.alliances.is_empty() {
            return vec!["No alliances to monitor.".to_string()];
        }
        let mut lines = vec!["Currently monitored alliances:".to_string()];
        let mut current_days: Option<i64> = None;
        for alliance in self.alliances.iter().rev() {
            let days_inactive = alliance.days_inactive(self.evaluated_at);
            let whole_days = days_inactive.floor() as i64;
            if current_days.map_or(true, |days| whole_days < days) {
                current_days = Some(whole_days);
                lines.push(format!("Inactive more than {} days:", whole_days));
            }
            lines.push(format!(
                "{}: level {}, shop level {}, {} members, inactive {:.1} days.",
                alliance.name,
                alliance.level,
                alliance.shop_level,
                alliance.member_count(),
                days_inactive
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use monitor_domain::{rank_for_display, AllianceId, PlayerId, PlayerSummary};

    fn alliance(id: i64, name: &str, last_login: DateTime<Utc>) -> AllianceRecord {
        let mut alliance = AllianceRecord::named(name, 40);
        alliance.id = AllianceId(id);
        alliance.level = 5;
        alliance.shop_level = 2;
        alliance.players = vec![PlayerSummary {
            id: PlayerId(id),
            last_login: Some(last_login),
        }];
        alliance
    }

    #[test]
    fn listing_groups_most_inactive_first() {
        let now = Utc::now();
        let mut summary = PassSummary::new(now);
        summary.alliances = vec![
            alliance(1, "Recent", now - Duration::hours(36)),
            alliance(2, "Older", now - Duration::hours(12 * 24 + 12)),
            alliance(3, "Oldest", now - Duration::hours(12 * 24 + 17)),
        ];
        rank_for_display(&mut summary.alliances);

        let lines = summary.listing();
        assert_eq!(
            lines,
            vec![
                "Currently monitored alliances:".to_string(),
                "Inactive more than 12 days:".to_string(),
                "Oldest: level 5, shop level 2, 1 members, inactive 12.7 days.".to_string(),
                "Older: level 5, shop level 2, 1 members, inactive 12.5 days.".to_string(),
                "Inactive more than 1 days:".to_string(),
                "Recent: level 5, shop level 2, 1 members, inactive 1.5 days.".to_string(),
            ]
        );
    }

    #[test]
    fn empty_listing_says_nothing_to_monitor() {
        let summary = PassSummary::new(Utc::now());
        assert_eq!(summary.listing(), vec!["No alliances to monitor.".to_string()]);
    }

    #[test]
    fn summary_line_reports_counts() {
        let mut summary = PassSummary::new(Utc::now());
        summary.checked = 4;
        summary.discarded = 1;
        summary.kept = 3;
        summary.found = 2;
        assert_eq!(
            summary.summary_line(),
            "checked 4, discarded 1, kept 3, found 2, monitoring 0"
        );
    }
}
