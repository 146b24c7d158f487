//! Command-line options.
//!
//! Parsed by `clap` from the field attributes. The binary converts these into
//! a [`Config`] and a [`FilterConfig`] before calling into the library.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{DEFAULT_KEY_FILE, DEFAULT_MIN_VIEWS, DEFAULT_TIMEOUT_SECS};
use crate::config::types::{
    Config, FilterConfig, LogFormat, LogLevel, LookbackPeriod, PageSize, RatioThreshold,
    ShortsMode,
};
use crate::search::{SortDirection, SortKey, SortState};

/// # Examples
///
/// ```bash
/// # Verify and remember an API key
/// video_scout --api-key "$KEY" verify-key
///
/// # Non-short videos from Japanese channels with 2x their subscriber count in views
/// video_scout search --keyword "shampoo" --country JP --ratio 2 --export ./out
///
/// # Export every comment of two videos
/// video_scout comments dQw4w9WgXcQ 9bZkp7q19f0 --output-dir ./out
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "video_scout",
    about = "Finds videos that outperform their channel's audience and exports them with their comments."
)]
pub struct Cli {
    /// API key (falls back to the saved key)
    #[arg(long, global = true, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// File the verified API key is saved to
    #[arg(long, global = true, value_parser, default_value = DEFAULT_KEY_FILE)]
    pub key_file: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Operator actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the API key authenticates, and save it if it does
    VerifyKey,
    /// Search, qualify, and rank videos
    Search(SearchArgs),
    /// Fetch every comment thread of the given videos and export them
    Comments(CommentsArgs),
}

/// Options of the `search` subcommand.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search keyword (blank uses the built-in default phrase)
    #[arg(long, default_value = "")]
    pub keyword: String,

    /// Minimum view count
    #[arg(long, default_value_t = DEFAULT_MIN_VIEWS)]
    pub min_views: u64,

    /// Two-letter country code the channel must report
    #[arg(long)]
    pub country: Option<String>,

    /// Results per search page: 10|20|50
    #[arg(long, value_enum, default_value_t = PageSize::Fifty)]
    pub page_size: PageSize,

    /// Admit rows on views alone (includes hidden subscriber counts)
    #[arg(long)]
    pub include_hidden: bool,

    /// Publish window: 6m|1y|2y|3y
    #[arg(long, value_enum, default_value_t = LookbackPeriod::ThreeYears)]
    pub period: LookbackPeriod,

    /// Short-form handling: exclude|include|only
    #[arg(long = "shorts", value_enum, default_value_t = ShortsMode::Exclude)]
    pub shorts_mode: ShortsMode,

    /// Views-to-subscribers multiple: 1|2|3
    #[arg(long = "ratio", value_enum, default_value_t = RatioThreshold::Three)]
    pub ratio_threshold: RatioThreshold,

    /// Directory the video list CSV is written to
    #[arg(long, value_parser)]
    pub export: Option<PathBuf>,

    /// Video ids (from the results) whose comments are fetched and exported together
    #[arg(long = "select", value_delimiter = ',')]
    pub selected: Vec<String>,

    /// Display order column: viewCount|subscriberCount|spreadRate|likeCount|publishedAt
    #[arg(long, value_enum, default_value_t = SortKey::ViewCount)]
    pub sort: SortKey,

    /// Display order direction: desc|asc
    #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
    pub sort_direction: SortDirection,
}

impl SearchArgs {
    /// Builds the immutable filter configuration of this search.
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            keyword: self.keyword.clone(),
            min_views: self.min_views,
            country: self.country.clone(),
            page_size: self.page_size,
            include_hidden: self.include_hidden,
            period: self.period,
            shorts_mode: self.shorts_mode,
            ratio_threshold: self.ratio_threshold,
        }
    }

    pub fn sort_state(&self) -> SortState {
        SortState {
            key: self.sort,
            direction: self.sort_direction,
        }
    }
}

/// Options of the `comments` subcommand.
#[derive(Debug, Args)]
pub struct CommentsArgs {
    /// Video ids
    #[arg(required = true)]
    pub video_ids: Vec<String>,

    /// Directory the comment CSVs are written to
    #[arg(long, value_parser, default_value = ".")]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Library configuration derived from the global options.
    pub fn config(&self) -> Config {
        Config {
            timeout_seconds: self.timeout_seconds,
            ..Default::default()
        }
    }
}
