//! Configuration types.
//!
//! This module defines the enums and structs that make up a search's filter
//! configuration, the library configuration, and the logging options.

use chrono::{DateTime, Months, SecondsFormat, Utc};
use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_KEYWORD, DEFAULT_MIN_VIEWS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    SHORT_DURATION_CUTOFF_SECS, YOUTUBE_API_BASE,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How far back a search looks for published videos.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LookbackPeriod {
    /// Last six months
    #[value(name = "6m")]
    SixMonths,
    /// Last year
    #[value(name = "1y")]
    OneYear,
    /// Last two years
    #[value(name = "2y")]
    TwoYears,
    /// Last three years (default)
    #[default]
    #[value(name = "3y")]
    ThreeYears,
}

impl LookbackPeriod {
    fn months(self) -> u32 {
        match self {
            LookbackPeriod::SixMonths => 6,
            LookbackPeriod::OneYear => 12,
            LookbackPeriod::TwoYears => 24,
            LookbackPeriod::ThreeYears => 36,
        }
    }

    /// Earliest publish time for this window, as an ISO 8601 UTC timestamp
    /// with millisecond precision (e.g. `2023-10-16T09:30:00.000Z`).
    ///
    /// Month arithmetic clamps to the end of the month, so a window ending on
    /// 31 August starts on the last day of February.
    pub fn published_after(self, now: DateTime<Utc>) -> String {
        now.checked_sub_months(Months::new(self.months()))
            .unwrap_or(now)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Treatment of short-form videos by the filter pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ShortsMode {
    /// Drop short-form videos (default)
    #[default]
    Exclude,
    /// Keep every video
    Include,
    /// Keep only short-form videos
    Only,
}

/// Multiple of the subscriber count a video's views must reach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RatioThreshold {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[default]
    #[value(name = "3")]
    Three,
}

impl RatioThreshold {
    pub fn multiple(self) -> u64 {
        match self {
            RatioThreshold::One => 1,
            RatioThreshold::Two => 2,
            RatioThreshold::Three => 3,
        }
    }

    /// Label used in the matched-rule column (`"1x"`, `"2x"`, `"3x"`).
    pub fn label(self) -> &'static str {
        match self {
            RatioThreshold::One => "1x",
            RatioThreshold::Two => "2x",
            RatioThreshold::Three => "3x",
        }
    }
}

/// Results requested per search page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PageSize {
    #[value(name = "10")]
    Ten,
    #[value(name = "20")]
    Twenty,
    #[default]
    #[value(name = "50")]
    Fifty,
}

impl PageSize {
    pub fn as_u32(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }
}

/// Parameters of one search execution.
///
/// Built once per search and never mutated while the search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Search keyword; blank falls back to [`DEFAULT_KEYWORD`]
    pub keyword: String,
    /// Minimum view count a row must reach
    pub min_views: u64,
    /// Two-letter country code the channel must report (case-insensitive)
    pub country: Option<String>,
    /// Results requested per search page
    pub page_size: PageSize,
    /// Admit rows on views alone, including channels with hidden subscriber counts
    pub include_hidden: bool,
    /// Publish-time window
    pub period: LookbackPeriod,
    /// Short-form handling
    pub shorts_mode: ShortsMode,
    /// Required views-to-subscribers multiple
    pub ratio_threshold: RatioThreshold,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            min_views: DEFAULT_MIN_VIEWS,
            country: None,
            page_size: PageSize::default(),
            include_hidden: false,
            period: LookbackPeriod::default(),
            shorts_mode: ShortsMode::default(),
            ratio_threshold: RatioThreshold::default(),
        }
    }
}

impl FilterConfig {
    /// The keyword actually searched for.
    pub fn effective_keyword(&self) -> &str {
        let trimmed = self.keyword.trim();
        if trimmed.is_empty() {
            DEFAULT_KEYWORD
        } else {
            trimmed
        }
    }

    /// Upper-cased country code, or `None` when unset or blank.
    pub fn normalized_country(&self) -> Option<String> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use video_scout::Config;
///
/// let config = Config {
///     timeout_seconds: 30,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Data API (overridden in tests)
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Duration at or below which a video is short-form
    pub short_cutoff_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: YOUTUBE_API_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            short_cutoff_secs: SHORT_DURATION_CUTOFF_SECS,
        }
    }
}
