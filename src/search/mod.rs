//! Keyword search: pagination, batched lookups, filtering and ranking.

mod aggregator;
mod pipeline;
mod sort;

pub use aggregator::{
    aggregate, collect_video_ids, fetch_channels, fetch_videos, unique_channel_ids, Aggregated,
    ProgressCallback, SearchProgress,
};
pub use pipeline::{apply, passes, FilterOutcome};
pub use sort::{sort_rows, sorted, SortDirection, SortKey, SortState};

use chrono::{DateTime, Utc};
use log::info;

use crate::api::{ApiClient, SearchQuery};
use crate::config::{FilterConfig, SEARCH_MAX_PAGES};
use crate::error_handling::ApiError;
use crate::rows::{build_rows, RowRules, VideoRow};

/// Result of one completed search run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// The keyword actually searched for
    pub keyword: String,
    /// Filtered rows, highest view count first
    pub rows: Vec<VideoRow>,
    pub total_before: usize,
    pub progress: SearchProgress,
}

/// Search request parameters for `filter`, with the publish window anchored at `now`.
pub fn build_query(filter: &FilterConfig, now: DateTime<Utc>) -> SearchQuery {
    SearchQuery {
        keyword: filter.effective_keyword().to_string(),
        published_after: filter.period.published_after(now),
        page_size: filter.page_size.as_u32(),
        region_code: filter.normalized_country(),
    }
}

/// Runs a complete search: up to [`SEARCH_MAX_PAGES`] search pages, the
/// video and channel lookups, row building, and the filter/sort pipeline.
///
/// A missing API key fails before any request is sent. Any failing request
/// aborts the run; no partial rows are returned.
pub async fn run_search(
    client: &ApiClient,
    filter: &FilterConfig,
    short_cutoff_secs: u64,
    now: DateTime<Utc>,
    callback: &ProgressCallback,
) -> Result<SearchOutcome, ApiError> {
    if !client.has_api_key() {
        return Err(ApiError::MissingApiKey);
    }

    let query = build_query(filter, now);
    info!(
        "Searching '{}' since {} (page size {})",
        query.keyword, query.published_after, query.page_size
    );

    let mut progress = SearchProgress::default();
    let aggregated = aggregate(client, &query, SEARCH_MAX_PAGES, &mut progress, callback).await?;

    let rules = RowRules::from_filter(filter, short_cutoff_secs);
    let rows = build_rows(&aggregated.videos, &aggregated.channels, &rules);
    let outcome = apply(rows, filter);
    info!(
        "Filtered {} rows down to {}",
        outcome.total_before, outcome.total_after
    );

    progress.total_filtered = outcome.total_after;
    aggregator::report(callback, &progress);

    Ok(SearchOutcome {
        keyword: query.keyword,
        rows: outcome.rows,
        total_before: outcome.total_before,
        progress,
    })
}
