//! Multi-page search retrieval and batched detail lookups.
//!
//! Every request is issued sequentially: page N+1 needs page N's
//! continuation token, and the lookups need the full id list. The first
//! failing request aborts the whole run and nothing fetched so far is kept.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info};

use crate::api::models::{ChannelResource, VideoResource};
use crate::api::{ApiClient, SearchQuery};
use crate::config::LOOKUP_BATCH_SIZE;
use crate::error_handling::ApiError;

/// Interim status of a running search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchProgress {
    /// Search pages processed so far
    pub current_page: usize,
    /// Page budget of this run
    pub total_pages: usize,
    /// Video identifiers collected so far
    pub total_fetched: usize,
    /// Rows left after filtering; 0 until the run completes
    pub total_filtered: usize,
}

/// Optional progress callback, invoked after every search page and once at
/// the end of a run.
pub type ProgressCallback = Option<Arc<dyn Fn(&SearchProgress) + Send + Sync>>;

pub(crate) fn report(progress: &ProgressCallback, snapshot: &SearchProgress) {
    if let Some(callback) = progress {
        callback(snapshot);
    }
}

/// Raw records gathered by one search run.
#[derive(Debug, Clone, Default)]
pub struct Aggregated {
    pub video_ids: Vec<String>,
    pub videos: Vec<VideoResource>,
    /// Channel records keyed by channel id
    pub channels: HashMap<String, ChannelResource>,
}

/// Collects video identifiers, following continuation tokens until the token
/// is absent or `max_pages` pages have been read.
///
/// An id returned by more than one page is kept once, at its first position.
pub async fn collect_video_ids(
    client: &ApiClient,
    query: &SearchQuery,
    max_pages: usize,
    progress: &mut SearchProgress,
    callback: &ProgressCallback,
) -> Result<Vec<String>, ApiError> {
    let mut video_ids = Vec::new();
    let mut seen = HashSet::new();
    let mut page_token: Option<String> = None;
    progress.total_pages = max_pages;

    for page in 1..=max_pages {
        let response = client.search_page(query, page_token.as_deref()).await?;
        video_ids.extend(
            response
                .items
                .iter()
                .filter_map(|item| item.video_id())
                .filter(|id| seen.insert(id.to_string()))
                .map(str::to_string),
        );

        progress.current_page = page;
        progress.total_fetched = video_ids.len();
        report(callback, progress);
        debug!(
            "Search page {}/{}: {} ids so far",
            page,
            max_pages,
            video_ids.len()
        );

        page_token = response.next_page_token.filter(|t| !t.is_empty());
        if page_token.is_none() {
            break;
        }
    }

    Ok(video_ids)
}

/// Fetches video details in batches of [`LOOKUP_BATCH_SIZE`], concatenated in
/// request order.
pub async fn fetch_videos(
    client: &ApiClient,
    video_ids: &[String],
) -> Result<Vec<VideoResource>, ApiError> {
    let mut videos = Vec::with_capacity(video_ids.len());
    for batch in video_ids.chunks(LOOKUP_BATCH_SIZE) {
        videos.extend(client.videos(batch).await?);
    }
    Ok(videos)
}

/// Channel ids referenced by `videos`, first occurrence order, no repeats.
pub fn unique_channel_ids(videos: &[VideoResource]) -> Vec<String> {
    let mut seen = HashSet::new();
    videos
        .iter()
        .filter_map(|video| video.channel_id())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Fetches the channels of `videos` in batches of [`LOOKUP_BATCH_SIZE`].
pub async fn fetch_channels(
    client: &ApiClient,
    videos: &[VideoResource],
) -> Result<HashMap<String, ChannelResource>, ApiError> {
    let channel_ids = unique_channel_ids(videos);
    let mut channels = HashMap::with_capacity(channel_ids.len());
    for batch in channel_ids.chunks(LOOKUP_BATCH_SIZE) {
        for channel in client.channels(batch).await? {
            channels.insert(channel.id.clone(), channel);
        }
    }
    Ok(channels)
}

/// Runs the search phase followed by the video and channel lookups.
///
/// Zero identifiers is not an error: the lookups are skipped and an empty
/// [`Aggregated`] is returned.
pub async fn aggregate(
    client: &ApiClient,
    query: &SearchQuery,
    max_pages: usize,
    progress: &mut SearchProgress,
    callback: &ProgressCallback,
) -> Result<Aggregated, ApiError> {
    let video_ids = collect_video_ids(client, query, max_pages, progress, callback).await?;
    info!(
        "Collected {} video ids from {} search page(s)",
        video_ids.len(),
        progress.current_page
    );
    if video_ids.is_empty() {
        return Ok(Aggregated::default());
    }

    let videos = fetch_videos(client, &video_ids).await?;
    let channels = fetch_channels(client, &videos).await?;
    info!(
        "Resolved {} videos across {} channels",
        videos.len(),
        channels.len()
    );

    Ok(Aggregated {
        video_ids,
        videos,
        channels,
    })
}
