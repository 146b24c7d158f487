//! video_scout library: keyword video discovery and qualification
//!
//! This library queries the YouTube Data API for videos matching a keyword
//! and publish window, joins each video with its channel, keeps the videos
//! whose views clear the configured thresholds, and exports the ranked list
//! and the videos' comment threads as CSV.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use video_scout::storage::FileKeyStore;
//! use video_scout::{Config, FilterConfig, RatioThreshold, Session};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(
//!     Config::default(),
//!     Arc::new(FileKeyStore::new("./.video_scout_key.json")),
//! )?;
//! let filter = FilterConfig {
//!     keyword: "shampoo".to_string(),
//!     ratio_threshold: RatioThreshold::Two,
//!     ..Default::default()
//! };
//! session.search(&filter, &None).await?;
//! for row in session.rows() {
//!     println!("{} {} ({})", row.view_count, row.title, row.matched_rule);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Network operations are async and require a Tokio runtime.

pub mod api;
pub mod app;
pub mod classify;
pub mod comments;
pub mod config;
pub mod duration;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod qualify;
pub mod rows;
pub mod search;
pub mod session;
pub mod storage;

// Re-export public API
pub use api::{ApiClient, KeyCheck};
pub use config::{
    Config, FilterConfig, LogFormat, LogLevel, LookbackPeriod, PageSize, RatioThreshold,
    ShortsMode,
};
pub use error_handling::{ApiError, ExportError, InitializationError, StorageError};
pub use rows::{CommentRow, VideoRow};
pub use search::{run_search, SearchOutcome, SearchProgress, SortKey, SortState};
pub use session::{SearchState, SearchStatus, Session};
