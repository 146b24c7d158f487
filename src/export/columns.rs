//! Column sets and value selectors for the two export kinds.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::rows::{CommentRow, VideoRow};

pub const VIDEO_HEADERS: [&str; 15] = [
    "videoId",
    "title",
    "channelId",
    "channelTitle",
    "publishedAt",
    "viewCount",
    "subscriberCount",
    "spreadRate",
    "likeCount",
    "country",
    "videoUrl",
    "thumbnailUrl",
    "matchedRule",
    "keywords",
    "searchedAt",
];

pub const COMMENT_HEADERS: [&str; 8] = [
    "videoId",
    "commentId",
    "parentId",
    "authorDisplayName",
    "textOriginal",
    "likeCount",
    "publishedAt",
    "updatedAt",
];

/// Values shared by every row of one video export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoExportContext {
    /// Keyword the rows were searched with
    pub keyword: String,
    /// Export time, ISO 8601 UTC with milliseconds
    pub searched_at: String,
}

impl VideoExportContext {
    pub fn new(keyword: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            keyword: keyword.into(),
            searched_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub fn video_value(row: &VideoRow, key: &str, context: &VideoExportContext) -> Option<String> {
    match key {
        "videoId" => Some(row.video_id.clone()),
        "title" => Some(row.title.clone()),
        "channelId" => Some(row.channel_id.clone()),
        "channelTitle" => Some(row.channel_title.clone()),
        "publishedAt" => Some(row.published_at.clone()),
        "viewCount" => Some(row.view_count.to_string()),
        "subscriberCount" => row.subscriber_count.map(|n| n.to_string()),
        "spreadRate" => row.spread_rate.map(|rate| format!("{:.2}", rate)),
        "likeCount" => row.like_count.map(|n| n.to_string()),
        "country" => row.country.clone(),
        "videoUrl" => Some(row.video_url.clone()),
        "thumbnailUrl" => Some(row.thumbnail_url.clone()),
        "matchedRule" => Some(row.matched_rule.label().to_string()),
        "keywords" => Some(context.keyword.clone()),
        "searchedAt" => Some(context.searched_at.clone()),
        _ => None,
    }
}

pub fn comment_value(row: &CommentRow, key: &str) -> Option<String> {
    match key {
        "videoId" => Some(row.video_id.clone()),
        "commentId" => Some(row.comment_id.clone()),
        "parentId" => row.parent_id.clone(),
        "authorDisplayName" => Some(row.author_display_name.clone()),
        "textOriginal" => Some(row.text_original.clone()),
        "likeCount" => Some(row.like_count.to_string()),
        "publishedAt" => Some(row.published_at.clone()),
        "updatedAt" => row.updated_at.clone(),
        _ => None,
    }
}

/// Timestamp fragment for export file names (`:` replaced so the name is
/// valid on every filesystem).
fn file_stamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-")
}

pub fn videos_filename(now: DateTime<Utc>) -> String {
    format!("videos_{}.csv", file_stamp(now))
}

pub fn comments_filename(video_id: &str, now: DateTime<Utc>) -> String {
    format!("comments_{}_{}.csv", video_id, file_stamp(now))
}

pub fn selected_comments_filename(now: DateTime<Utc>) -> String {
    format!("comments_selected_{}.csv", file_stamp(now))
}
