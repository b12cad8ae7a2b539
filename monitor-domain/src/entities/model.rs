use crate::entities::DEFAULT_MAX_MEMBERS;

/// Tuning for one monitoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Size the monitored set is topped up to.
    pub target_size: usize,
    /// A candidate must be inactive strictly longer than this to be accepted.
    pub min_days_inactive: f64,
    pub default_max_members: u32,
    /// Upper bound on suggestion pages requested per top-up; `None` searches
    /// until enough candidates are found.
    pub max_suggestion_pages: Option<u32>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            target_size: 100,
            min_days_inactive: 0.0,
            default_max_members: DEFAULT_MAX_MEMBERS,
            max_suggestion_pages: Some(1000),
        }
    }
}
