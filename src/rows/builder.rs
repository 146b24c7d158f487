//! Joins raw video and channel records into [`VideoRow`]s.

use std::collections::HashMap;

use crate::api::models::{ChannelResource, VideoResource};
use crate::classify::is_short;
use crate::config::{FilterConfig, RatioThreshold, CHANNEL_URL_PREFIX, VIDEO_URL_PREFIX};
use crate::qualify::{qualifies_by_ratio, MatchedRule};

use super::models::VideoRow;

/// The parts of the search configuration that shape a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRules {
    pub min_views: u64,
    pub ratio_threshold: RatioThreshold,
    pub short_cutoff_secs: u64,
}

impl RowRules {
    pub fn from_filter(filter: &FilterConfig, short_cutoff_secs: u64) -> Self {
        RowRules {
            min_views: filter.min_views,
            ratio_threshold: filter.ratio_threshold,
            short_cutoff_secs,
        }
    }
}

/// `view_count / subscriber_count` when the count is known, visible, and non-zero.
pub fn spread_rate(view_count: u64, subscriber_count: Option<u64>, hidden: bool) -> Option<f64> {
    match subscriber_count {
        Some(subscribers) if !hidden && subscribers > 0 => {
            Some(view_count as f64 / subscribers as f64)
        }
        _ => None,
    }
}

/// Builds the row for one video.
///
/// A missing `channel` leaves the subscriber count and country unknown; it
/// does not turn them into zero.
pub fn build_video_row(
    video: &VideoResource,
    channel: Option<&ChannelResource>,
    rules: &RowRules,
) -> VideoRow {
    let snippet = video.snippet.as_ref();
    let statistics = video.statistics.as_ref();
    let channel_stats = channel.and_then(|c| c.statistics.as_ref());

    let view_count = statistics.and_then(|s| s.view_count).unwrap_or(0);
    let like_count = statistics.and_then(|s| s.like_count);
    let subscriber_count = channel_stats.and_then(|s| s.subscriber_count);
    let hidden = channel_stats
        .and_then(|s| s.hidden_subscriber_count)
        .unwrap_or(false);
    let country = channel
        .and_then(|c| c.snippet.as_ref())
        .and_then(|s| s.country.clone())
        .filter(|c| !c.is_empty());

    let by_ratio = qualifies_by_ratio(
        view_count,
        subscriber_count,
        hidden,
        rules.ratio_threshold.multiple(),
    );
    let by_min_views = view_count >= rules.min_views;

    let thumbnails = snippet.and_then(|s| s.thumbnails.as_ref());
    let thumbnail_url = thumbnails
        .and_then(|t| t.medium.as_ref())
        .and_then(|t| t.url.clone())
        .or_else(|| {
            thumbnails
                .and_then(|t| t.default.as_ref())
                .and_then(|t| t.url.clone())
        })
        .unwrap_or_default();

    let text = |field: Option<&String>| field.cloned().unwrap_or_default();
    let channel_id = text(snippet.and_then(|s| s.channel_id.as_ref()));

    VideoRow {
        video_id: video.id.clone(),
        title: text(snippet.and_then(|s| s.title.as_ref())),
        channel_title: text(snippet.and_then(|s| s.channel_title.as_ref())),
        published_at: text(snippet.and_then(|s| s.published_at.as_ref())),
        view_count,
        like_count,
        thumbnail_url,
        video_url: format!("{}{}", VIDEO_URL_PREFIX, video.id),
        channel_url: format!("{}{}", CHANNEL_URL_PREFIX, channel_id),
        channel_id,
        subscriber_count,
        hidden_subscriber_count: hidden,
        country,
        matched_rule: MatchedRule::select(by_ratio, by_min_views, rules.ratio_threshold),
        is_short: is_short(video, rules.short_cutoff_secs),
        spread_rate: spread_rate(view_count, subscriber_count, hidden),
    }
}

/// Builds one row per video, in input order, resolving channels by id.
pub fn build_rows(
    videos: &[VideoResource],
    channels: &HashMap<String, ChannelResource>,
    rules: &RowRules,
) -> Vec<VideoRow> {
    videos
        .iter()
        .map(|video| {
            let channel = video.channel_id().and_then(|id| channels.get(id));
            build_video_row(video, channel, rules)
        })
        .collect()
}
