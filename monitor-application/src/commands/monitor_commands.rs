use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use monitor_domain::services::activity;
use monitor_domain::{dedup_by_id, rank_for_display, AllianceRecord};

use crate::{AppError, AppState, PassSummary};

/// Alliances accepted by one top-up search.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub alliances: Vec<AllianceRecord>,
    pub pages: u32,
    /// Stopped on the page budget before reaching the wanted count.
    pub exhausted: bool,
}

pub async fn run_monitoring_pass(state: &AppState) -> Result<PassSummary, AppError> {
    run_monitoring_pass_at(state, Utc::now()).await
}

/// Re-checks the saved set, tops it up to the target size and saves the
/// ranked result. Only snapshot failures abort the pass; the previous
/// snapshot is left untouched when they do.
pub async fn run_monitoring_pass_at(
    state: &AppState,
    now: DateTime<Utc>,
) -> Result<PassSummary, AppError> {
    let monitored = state
        .snapshot_repo
        .load()
        .await
        .map_err(AppError::SnapshotLoad)?;

    let mut summary = PassSummary::new(now);
    summary.checked = monitored.len();

    let kept = if monitored.is_empty() {
        Vec::new()
    } else {
        info!("Checking {} monitored alliances", summary.checked);
        let kept = check_prospective_alliances(state, monitored, now).await;
        summary.kept = kept.len();
        summary.discarded = summary.checked - summary.kept;
        if summary.discarded > 0 {
            info!(
                "{} alliances had activity or no longer exist and were discarded.",
                summary.discarded
            );
        }
        if summary.kept > 0 {
            info!("{} alliances will continue to be monitored.", summary.kept);
        }
        kept
    };

    let mut combined = Vec::new();
    if kept.len() < state.config.target_size {
        let wanted = state.config.target_size - kept.len();
        info!("Finding {} new alliances to monitor... this will take a little time.", wanted);
        let outcome = find_prospective_alliances(state, wanted, now).await;
        summary.search_ran = true;
        summary.search_exhausted = outcome.exhausted;
        summary.found = outcome.alliances.len();
        if summary.found > 0 {
            info!("Found {} new alliances to monitor.", summary.found);
        } else {
            info!("No new alliances identified.");
        }
        combined = outcome.alliances;
    }
    combined.extend(kept);

    let before_dedup = combined.len();
    let mut merged = dedup_by_id(combined);
    summary.duplicates_removed = before_dedup - merged.len();
    if summary.duplicates_removed > 0 {
        info!("Removing {} duplicates", summary.duplicates_removed);
    }
    rank_for_display(&mut merged);

    if merged.is_empty() {
        info!("No alliances to monitor.");
        state
            .snapshot_repo
            .delete()
            .await
            .map_err(AppError::SnapshotSave)?;
    } else {
        state
            .snapshot_repo
            .save(&merged)
            .await
            .map_err(AppError::SnapshotSave)?;
    }
    debug!("gateway usage: {}", state.metrics.render_text());

    summary.alliances = merged;
    Ok(summary)
}

/// Keeps, in input order, the alliances that still resolve, still qualify and
/// show no login since they were last checked.
pub async fn check_prospective_alliances(
    state: &AppState,
    alliances: Vec<AllianceRecord>,
    now: DateTime<Utc>,
) -> Vec<AllianceRecord> {
    let mut kept = Vec::with_capacity(alliances.len());
    for mut alliance in alliances {
        let since_last_check = activity::since_last_check(&alliance, now);
        if !refresh(state, &mut alliance).await {
            continue;
        }
        if !activity::is_still_qualifying(&alliance) {
            debug!("alliance {} no longer qualifies", alliance.id);
            continue;
        }
        if activity::has_new_activity_since_last_check(&alliance, now, since_last_check) {
            debug!("alliance {} had a login since the last check", alliance.id);
            continue;
        }
        kept.push(alliance);
    }
    kept
}

/// Pulls suggestion pages until `wanted` joinable, inactive alliances are
/// found or the configured page budget runs out.
///
/// Suggestions repeat across pages, so candidates are de-duplicated by name
/// before any detail request is spent on them. Private alliances and ones
/// with weekly experience are rejected without a detail request.
pub async fn find_prospective_alliances(
    state: &AppState,
    wanted: usize,
    now: DateTime<Utc>,
) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();
    let mut seen_names = HashSet::new();

    while outcome.alliances.len() < wanted {
        if let Some(limit) = state.config.max_suggestion_pages {
            if outcome.pages >= limit {
                warn!(
                    "suggestion search stopped after {} pages with {} of {} alliances",
                    outcome.pages,
                    outcome.alliances.len(),
                    wanted
                );
                outcome.exhausted = true;
                break;
            }
        }
        outcome.pages += 1;

        let page = match state.gateway.suggested_alliances().await {
            Ok(page) => {
                state.metrics.record_suggestion_page(page.len());
                page
            }
            Err(err) => {
                state.metrics.record_suggestion_error();
                warn!("suggested alliances request failed: {:#}", err);
                continue;
            }
        };

        for mut candidate in page {
            if outcome.alliances.len() >= wanted {
                break;
            }
            if !seen_names.insert(candidate.name.clone()) {
                continue;
            }
            if candidate.weekly_experience > 0 || !candidate.is_public {
                continue;
            }
            if !refresh(state, &mut candidate).await || candidate.is_full() {
                continue;
            }
            if activity::is_inactive_for(&candidate, now, state.config.min_days_inactive) {
                outcome.alliances.push(candidate);
            }
        }
    }
    outcome
}

async fn refresh(state: &AppState, alliance: &mut AllianceRecord) -> bool {
    match state.gateway.refresh_alliance(alliance).await {
        Ok(()) => {
            state.metrics.record_refresh(true);
            if alliance.is_over_capacity() {
                warn!(
                    "alliance {} lists {} members but capacity is {}",
                    alliance.id,
                    alliance.member_count(),
                    alliance.max_members
                );
            }
            true
        }
        Err(err) => {
            state.metrics.record_refresh(false);
            debug!("dropping alliance {} ({}): {}", alliance.id, alliance.name, err);
            false
        }
    }
}
