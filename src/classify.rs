//! Short-form ("Shorts") video classification.
//!
//! A video is short-form when its duration is at or below the cutoff, or when
//! its title, description, or any tag carries a shorts marker.

use regex::Regex;
use std::sync::LazyLock;

use crate::api::models::VideoResource;
use crate::duration::parse_duration_secs;

/// Markers recognised in titles, descriptions, and tags.
///
/// `short動画` and the katakana forms (`ショート`, `ショーツ`) are the
/// Japanese shorthand for short videos.
const SHORT_MARKER_PATTERN: &str = r"(?i)#shorts|#short|shorts|short動画|ショート|ショーツ";

static SHORT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SHORT_MARKER_PATTERN).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}': {}. This is a programming error.",
            SHORT_MARKER_PATTERN, e
        )
    })
});

/// Returns `true` if `text` contains a shorts marker.
pub fn has_short_marker(text: &str) -> bool {
    SHORT_MARKER_RE.is_match(text)
}

/// Decides whether `video` is short-form.
///
/// An unparseable or missing duration never counts as short on its own; the
/// text markers still apply.
pub fn is_short(video: &VideoResource, cutoff_secs: u64) -> bool {
    let short_by_time =
        parse_duration_secs(video.duration()).is_some_and(|secs| secs <= cutoff_secs);
    if short_by_time {
        return true;
    }

    let Some(snippet) = video.snippet.as_ref() else {
        return false;
    };

    snippet.title.as_deref().is_some_and(has_short_marker)
        || snippet.description.as_deref().is_some_and(has_short_marker)
        || snippet
            .tags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|tag| has_short_marker(tag))
}
