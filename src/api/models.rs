//! YouTube Data API v3 response records.
//!
//! Every nested field the API may omit is an `Option` (or defaults to empty),
//! so a sparse payload deserializes instead of failing. Counts arrive as
//! decimal strings for videos and channels and as numbers for comments; both
//! forms are accepted.

use serde::{Deserialize, Deserializer};

/// Accepts `"123"`, `123`, or `null`. Anything unparseable becomes `None`.
fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text.trim().parse().ok(),
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Other(_)) | None => None,
    })
}

// --- search.list ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    pub id: Option<SearchItemId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: Option<String>,
}

impl SearchItem {
    /// The nested video id, if this item is a video with a non-empty id.
    pub fn video_id(&self) -> Option<&str> {
        self.id
            .as_ref()
            .and_then(|id| id.video_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

// --- videos.list ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

/// One video with snippet, statistics, and content details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
    pub content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_id: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "count")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub like_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoContentDetails {
    pub duration: Option<String>,
}

impl VideoResource {
    pub fn channel_id(&self) -> Option<&str> {
        self.snippet
            .as_ref()
            .and_then(|s| s.channel_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    pub fn duration(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|c| c.duration.as_deref())
    }
}

// --- channels.list ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelResource {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelSnippet {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default, deserialize_with = "count")]
    pub subscriber_count: Option<u64>,
    pub hidden_subscriber_count: Option<bool>,
}

// --- commentThreads.list ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentThread {
    pub snippet: Option<CommentThreadSnippet>,
    pub replies: Option<CommentReplies>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Option<Comment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentReplies {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub author_display_name: Option<String>,
    pub text_display: Option<String>,
    pub text_original: Option<String>,
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "count")]
    pub like_count: Option<u64>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CommentThread {
    pub fn top_level_comment(&self) -> Option<&Comment> {
        self.snippet
            .as_ref()
            .and_then(|s| s.top_level_comment.as_ref())
    }

    pub fn reply_comments(&self) -> &[Comment] {
        self.replies
            .as_ref()
            .map(|r| r.comments.as_slice())
            .unwrap_or(&[])
    }
}
