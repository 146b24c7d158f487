//! Result row types.

use crate::qualify::MatchedRule;

/// One ranked search result: a video joined with its channel.
///
/// Built once per search and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRow {
    pub video_id: String,
    pub title: String,
    pub channel_id: String,
    pub channel_title: String,
    /// Publish time as reported by the API (ISO 8601)
    pub published_at: String,
    /// 0 when the API does not report views
    pub view_count: u64,
    pub like_count: Option<u64>,
    pub thumbnail_url: String,
    pub video_url: String,
    pub channel_url: String,
    /// `None` when the channel lookup is missing or reports no count
    pub subscriber_count: Option<u64>,
    pub hidden_subscriber_count: bool,
    /// Two-letter country code reported by the channel
    pub country: Option<String>,
    pub matched_rule: MatchedRule,
    pub is_short: bool,
    /// `view_count / subscriber_count`; present iff the subscriber count is
    /// known, visible, and non-zero
    pub spread_rate: Option<f64>,
}

/// One comment or reply of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub video_id: String,
    pub comment_id: String,
    /// `None` for top-level comments
    pub parent_id: Option<String>,
    pub author_display_name: String,
    /// Display text, or the original text when no display text is given
    pub text_original: String,
    pub like_count: u64,
    pub published_at: String,
    pub updated_at: Option<String>,
}
