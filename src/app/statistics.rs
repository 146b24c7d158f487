//! End-of-command summaries.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{Endpoint, RequestStats};
use crate::session::SearchState;

/// Prints the one-line result summary of a search.
pub fn print_search_summary(state: &SearchState, elapsed_seconds: f64) {
    info!(
        "Searched '{}': {} page{} processed, {} ids fetched, {} of {} rows kept in {:.1}s",
        state.keyword,
        state.progress.current_page,
        if state.progress.current_page == 1 { "" } else { "s" },
        state.progress.total_fetched,
        state.rows.len(),
        state.total_before,
        elapsed_seconds
    );
}

/// Prints per-endpoint request and failure counts.
pub fn print_request_statistics(stats: &RequestStats) {
    let total = stats.total_requests();
    if total == 0 {
        return;
    }

    info!(
        "Request Counts ({} total, {} failed):",
        total,
        stats.total_failures()
    );
    for endpoint in Endpoint::iter() {
        let requests = stats.request_count(endpoint);
        if requests > 0 {
            info!(
                "   {}: {} ({} failed)",
                endpoint.as_str(),
                requests,
                stats.failure_count(endpoint)
            );
        }
    }
}
