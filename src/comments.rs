//! Comment aggregation: every comment thread of a video, flattened.

use std::collections::HashMap;

use log::debug;

use crate::api::models::{Comment, CommentThread};
use crate::api::ApiClient;
use crate::rows::CommentRow;

fn comment_row(video_id: &str, comment: &Comment, parent_id: Option<String>) -> CommentRow {
    let snippet = comment.snippet.as_ref();
    let text = snippet
        .and_then(|s| s.text_display.clone().filter(|t| !t.is_empty()))
        .or_else(|| snippet.and_then(|s| s.text_original.clone()))
        .unwrap_or_default();

    CommentRow {
        video_id: video_id.to_string(),
        comment_id: comment.id.clone(),
        parent_id,
        author_display_name: snippet
            .and_then(|s| s.author_display_name.clone())
            .unwrap_or_default(),
        text_original: text,
        like_count: snippet.and_then(|s| s.like_count).unwrap_or(0),
        published_at: snippet
            .and_then(|s| s.published_at.clone())
            .unwrap_or_default(),
        updated_at: snippet.and_then(|s| s.updated_at.clone()),
    }
}

/// Flattens one thread: the top-level comment, then each reply.
///
/// A reply without its own parent id is linked to the thread's top-level
/// comment.
pub fn thread_rows(video_id: &str, thread: &CommentThread) -> Vec<CommentRow> {
    let mut rows = Vec::with_capacity(1 + thread.reply_comments().len());
    let top = thread.top_level_comment();
    let top_id = top.map(|c| c.id.clone()).filter(|id| !id.is_empty());

    if let Some(top) = top {
        rows.push(comment_row(video_id, top, None));
    }
    for reply in thread.reply_comments() {
        let parent = reply
            .snippet
            .as_ref()
            .and_then(|s| s.parent_id.clone())
            .filter(|id| !id.is_empty())
            .or_else(|| top_id.clone());
        rows.push(comment_row(video_id, reply, parent));
    }
    rows
}

/// Fetches every comment and reply of `video_id`, following continuation
/// tokens until none is returned.
///
/// Rows keep page order, and within a page, thread order with replies after
/// their top-level comment.
pub async fn fetch_all_comments(
    client: &ApiClient,
    video_id: &str,
) -> Result<Vec<CommentRow>, crate::error_handling::ApiError> {
    let mut rows = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let response = client
            .comment_threads(video_id, page_token.as_deref())
            .await?;
        pages += 1;
        for thread in &response.items {
            rows.extend(thread_rows(video_id, thread));
        }

        page_token = response.next_page_token.filter(|t| !t.is_empty());
        if page_token.is_none() {
            break;
        }
    }

    debug!(
        "Fetched {} comments for {} over {} page(s)",
        rows.len(),
        video_id,
        pages
    );
    Ok(rows)
}

/// Fetched comments keyed by video id.
#[derive(Debug, Clone, Default)]
pub struct CommentStore {
    by_video: HashMap<String, Vec<CommentRow>>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `rows` for `video_id`, replacing any earlier fetch.
    pub fn replace(&mut self, video_id: &str, rows: Vec<CommentRow>) {
        self.by_video.insert(video_id.to_string(), rows);
    }

    pub fn get(&self, video_id: &str) -> Option<&[CommentRow]> {
        self.by_video.get(video_id).map(Vec::as_slice)
    }

    pub fn contains(&self, video_id: &str) -> bool {
        self.by_video.contains_key(video_id)
    }

    /// Rows of every listed video that has been fetched, in list order.
    pub fn collect<'a, I>(&self, video_ids: I) -> Vec<CommentRow>
    where
        I: IntoIterator<Item = &'a str>,
    {
        video_ids
            .into_iter()
            .filter_map(|id| self.by_video.get(id))
            .flatten()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_video.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_video.is_empty()
    }
}
