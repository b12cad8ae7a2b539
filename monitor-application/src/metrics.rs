use std::sync::atomic::{AtomicU64, Ordering};

/// Gateway traffic counters for one process run.
#[derive(Debug, Default)]
pub struct Metrics {
    suggestion_pages: AtomicU64,
    suggestion_errors: AtomicU64,
    suggestions_pulled: AtomicU64,
    refresh_requests: AtomicU64,
    refresh_failures: AtomicU64,
}

impl Metrics {
    pub fn record_suggestion_page(&self, alliance_count: usize) {
        self.suggestion_pages.fetch_add(1, Ordering::Relaxed);
        self.suggestions_pulled
            .fetch_add(alliance_count as u64, Ordering::Relaxed);
    }

    pub fn record_suggestion_error(&self) {
        self.suggestion_pages.fetch_add(1, Ordering::Relaxed);
        self.suggestion_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_refresh(&self, succeeded: bool) {
        self.refresh_requests.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.refresh_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn suggestion_pages(&self) -> u64 {
        self.suggestion_pages.load(Ordering::Relaxed)
    }

    pub fn refresh_requests(&self) -> u64 {
        self.refresh_requests.load(Ordering::Relaxed)
    }

    pub fn render_text(&self) -> String {
        let pages = self.suggestion_pages.load(Ordering::Relaxed);
        let page_errors = self.suggestion_errors.load(Ordering::Relaxed);
        let pulled = self.suggestions_pulled.load(Ordering::Relaxed);
        let refreshes = self.refresh_requests.load(Ordering::Relaxed);
        let failures = self.refresh_failures.load(Ordering::Relaxed);

        format!(
            "suggestion_pages={} suggestion_errors={} suggestions_pulled={} refresh_requests={} refresh_failures={}",
            pages, page_errors, pulled, refreshes, failures
        )
    }
}
