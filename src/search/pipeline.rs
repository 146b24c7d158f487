//! Filter/sort pipeline over built rows.

use crate::config::{FilterConfig, ShortsMode};
use crate::qualify::qualifies_by_ratio;
use crate::rows::VideoRow;

/// Rows that survived filtering, with the counts shown in the status line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub rows: Vec<VideoRow>,
    pub total_before: usize,
    pub total_after: usize,
}

fn country_matches(row: &VideoRow, wanted: Option<&str>) -> bool {
    match wanted {
        Some(code) => row
            .country
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(code)),
        None => true,
    }
}

fn shorts_match(row: &VideoRow, mode: ShortsMode) -> bool {
    match mode {
        ShortsMode::Include => true,
        ShortsMode::Only => row.is_short,
        ShortsMode::Exclude => !row.is_short,
    }
}

/// Returns `true` if `row` passes every stage for `filter`.
///
/// Without `include_hidden` the ratio rule is required on top of the
/// minimum-view rule; with it, the ratio rule is skipped entirely.
pub fn passes(row: &VideoRow, filter: &FilterConfig) -> bool {
    let country = filter.normalized_country();
    if !country_matches(row, country.as_deref()) {
        return false;
    }
    if row.view_count < filter.min_views {
        return false;
    }
    if !shorts_match(row, filter.shorts_mode) {
        return false;
    }
    filter.include_hidden
        || qualifies_by_ratio(
            row.view_count,
            row.subscriber_count,
            row.hidden_subscriber_count,
            filter.ratio_threshold.multiple(),
        )
}

/// Keeps the rows that pass `filter`, ordered by descending view count.
///
/// The sort is stable, so equal view counts keep their input order.
pub fn apply(rows: Vec<VideoRow>, filter: &FilterConfig) -> FilterOutcome {
    let total_before = rows.len();
    let mut kept: Vec<VideoRow> = rows.into_iter().filter(|r| passes(r, filter)).collect();
    kept.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    FilterOutcome {
        total_after: kept.len(),
        rows: kept,
        total_before,
    }
}
