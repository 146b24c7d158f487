//! Column re-sort of the rendered result table.

use std::cmp::Ordering;

use chrono::DateTime;
use clap::ValueEnum;

use crate::rows::VideoRow;

/// Sortable result columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    #[value(name = "viewCount")]
    ViewCount,
    #[value(name = "subscriberCount")]
    SubscriberCount,
    #[value(name = "spreadRate")]
    SpreadRate,
    #[value(name = "likeCount")]
    LikeCount,
    #[value(name = "publishedAt")]
    PublishedAt,
}

impl SortKey {
    /// Numeric sort value; `None` sorts below every present value.
    fn value(self, row: &VideoRow) -> Option<f64> {
        match self {
            SortKey::ViewCount => Some(row.view_count as f64),
            SortKey::SubscriberCount => row.subscriber_count.map(|n| n as f64),
            SortKey::SpreadRate => row.spread_rate,
            SortKey::LikeCount => row.like_count.map(|n| n as f64),
            SortKey::PublishedAt => DateTime::parse_from_rfc3339(&row.published_at)
                .ok()
                .map(|t| t.timestamp_millis() as f64),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

/// Active sort column and direction. Defaults to view count, descending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// Next state after clicking `key`: a new column starts descending, the
    /// active column flips to ascending, and a third click restores the default.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key != key {
            return SortState {
                key,
                direction: SortDirection::Desc,
            };
        }
        match self.direction {
            SortDirection::Desc => SortState {
                key,
                direction: SortDirection::Asc,
            },
            SortDirection::Asc => SortState::default(),
        }
    }
}

fn compare(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `rows` by `state`.
pub fn sort_rows(rows: &mut [VideoRow], state: SortState) {
    rows.sort_by(|a, b| {
        let ordering = compare(state.key.value(a), state.key.value(b));
        match state.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Sorted copy of `rows`.
pub fn sorted(rows: &[VideoRow], state: SortState) -> Vec<VideoRow> {
    let mut out = rows.to_vec();
    sort_rows(&mut out, state);
    out
}
