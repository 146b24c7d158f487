//! Configuration constants.
//!
//! Limits imposed by the YouTube Data API and the defaults of a search.

/// Base URL of the YouTube Data API v3.
pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Canonical watch URL prefix (video id is appended).
pub const VIDEO_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
/// Canonical channel URL prefix (channel id is appended).
pub const CHANNEL_URL_PREFIX: &str = "https://www.youtube.com/channel/";

// Pagination and batching
/// Maximum number of search pages followed per search (10 x 50 = 500 candidates)
pub const SEARCH_MAX_PAGES: usize = 10;
/// Maximum identifiers per `videos.list` / `channels.list` request
pub const LOOKUP_BATCH_SIZE: usize = 50;
/// Page size of `commentThreads.list` (the API maximum)
pub const COMMENT_PAGE_SIZE: u32 = 100;

// Classification
/// Videos at or below this many seconds are treated as short-form.
///
/// Two shipped variants of the tool disagreed (61s and 120s); 120s is the
/// newer one and is the default. Override through `Config::short_cutoff_secs`.
pub const SHORT_DURATION_CUTOFF_SECS: u64 = 120;

// Search defaults
/// Keyword used when the operator leaves the keyword blank
pub const DEFAULT_KEYWORD: &str = "薄毛 対策 シャンプー";
/// Default minimum view count
pub const DEFAULT_MIN_VIEWS: u64 = 10_000;

// Key persistence
/// Fixed storage key under which the API key is persisted
pub const API_KEY_STORAGE_KEY: &str = "yt_api_key";
/// Default key file, relative to the working directory
pub const DEFAULT_KEY_FILE: &str = "./.video_scout_key.json";

// HTTP
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// User-Agent sent with every API request
pub const DEFAULT_USER_AGENT: &str = concat!("video_scout/", env!("CARGO_PKG_VERSION"));

/// Message used when a transport error carries no text of its own.
pub const NETWORK_ERROR_FALLBACK: &str = "network error";
